use crate::{Diagnostic, Mapped, ObjectId};

use resmap_core::{Error, Result};

/// Outcome of mapping every record of a response.
///
/// Records are listed in response order. A record that failed as a whole
/// (ambiguous identity, missing identifying key, not an object) appears in
/// `failures` and did not stop its siblings from being mapped.
#[derive(Debug, Clone, Default)]
pub struct Batch {
    pub mapped: Vec<Mapped>,

    pub failures: Vec<Failure>,
}

/// A record that could not be mapped.
#[derive(Debug, Clone)]
pub struct Failure {
    /// Position of the record in the response
    pub index: usize,

    pub error: Error,
}

impl Batch {
    /// Add a record's outcome. Configuration errors are returned instead of
    /// recorded, aborting the batch.
    pub(crate) fn push(&mut self, index: usize, result: Result<Mapped>) -> Result<()> {
        match result {
            Ok(mapped) => self.mapped.push(mapped),
            Err(err) if err.is_configuration() => return Err(err),
            Err(error) => {
                log::warn!("record {index} failed: {error}");
                self.failures.push(Failure { index, error });
            }
        }

        Ok(())
    }

    /// Mapped instances, in record order.
    pub fn objects(&self) -> Vec<ObjectId> {
        self.mapped.iter().map(|mapped| mapped.object).collect()
    }

    /// Every diagnostic of every mapped record.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.mapped.iter().flat_map(|mapped| &mapped.diagnostics)
    }

    /// Returns `true` if no record failed and none reported a diagnostic.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.mapped.iter().all(Mapped::is_clean)
    }
}
