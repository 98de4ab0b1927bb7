use super::Error;

/// Error when an identifying-key lookup matches more than one instance.
///
/// Identifying keys are unique per entity type inside a context, so more than
/// one match means the store or the schema is inconsistent. The resolver
/// never picks one of the candidates.
#[derive(Debug)]
pub(super) struct AmbiguousIdentity {
    entity: Box<str>,
    matches: usize,
}

impl std::error::Error for AmbiguousIdentity {}

impl core::fmt::Display for AmbiguousIdentity {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "ambiguous identity: {} instances of `{}` share the same identifying keys",
            self.matches, self.entity
        )
    }
}

impl Error {
    /// Creates an ambiguous identity error.
    pub fn ambiguous_identity(entity: impl Into<String>, matches: usize) -> Error {
        Error::from(super::ErrorKind::AmbiguousIdentity(AmbiguousIdentity {
            entity: entity.into().into(),
            matches,
        }))
    }

    /// Returns `true` if this error is an ambiguous identity error.
    pub fn is_ambiguous_identity(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::AmbiguousIdentity(_)))
    }
}
