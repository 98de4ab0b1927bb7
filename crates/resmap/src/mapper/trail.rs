use super::Diagnostic;

use resmap_core::{Error, Result};
use std::fmt::Write;

/// Current field path within a record, and the diagnostics reported so far.
#[derive(Debug, Default)]
pub(super) struct Trail {
    path: String,
    diagnostics: Vec<Diagnostic>,
}

impl Trail {
    pub(super) fn reset(&mut self) {
        self.path.clear();
        self.diagnostics.clear();
    }

    /// Appends `key` to the path, returning the length to restore.
    pub(super) fn push_key(&mut self, key: &str) -> usize {
        let len = self.path.len();
        if !self.path.is_empty() {
            self.path.push('.');
        }
        self.path.push_str(key);
        len
    }

    /// Appends `[index]` to the path, returning the length to restore.
    pub(super) fn push_index(&mut self, index: usize) -> usize {
        let len = self.path.len();
        let _ = write!(self.path, "[{index}]");
        len
    }

    pub(super) fn restore(&mut self, len: usize) {
        self.path.truncate(len);
    }

    pub(super) fn report(&mut self, error: Error) {
        log::warn!("{}: {error}", self.path);
        self.diagnostics.push(Diagnostic {
            path: self.path.clone(),
            error,
        });
    }

    /// Data errors become diagnostics; configuration errors and ambiguous
    /// identities pass through.
    pub(super) fn recover<T>(&mut self, result: Result<T>) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_fatal() => Err(err),
            Err(err) => {
                self.report(err);
                Ok(None)
            }
        }
    }

    pub(super) fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}
