use super::Error;

/// Error when an identifying-key lookup finds an instance whose concrete
/// entity type is not the type a resource was tagged with.
///
/// The instance keeps its type; the tagged resource is not applied.
#[derive(Debug)]
pub(super) struct ConflictingEntityType {
    tagged: Box<str>,
}

impl std::error::Error for ConflictingEntityType {}

impl core::fmt::Display for ConflictingEntityType {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "conflicting entity type: the existing instance is not a `{}`",
            self.tagged
        )
    }
}

impl Error {
    /// Creates a conflicting entity type error.
    pub fn conflicting_entity_type(tagged: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::ConflictingEntityType(
            ConflictingEntityType {
                tagged: tagged.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is a conflicting entity type error.
    pub fn is_conflicting_entity_type(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::ConflictingEntityType(_)))
    }
}
