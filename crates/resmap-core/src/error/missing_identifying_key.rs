use super::Error;

/// Error when a resource lacks one of the identifying keys needed to
/// resolve (or safely create) an entity instance.
#[derive(Debug)]
pub(super) struct MissingIdentifyingKey {
    entity: Box<str>,
    key: Box<str>,
}

impl std::error::Error for MissingIdentifyingKey {}

impl core::fmt::Display for MissingIdentifyingKey {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "missing identifying key `{}` for `{}`",
            self.key, self.entity
        )
    }
}

impl Error {
    /// Creates a missing identifying key error.
    pub fn missing_identifying_key(entity: impl Into<String>, key: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MissingIdentifyingKey(
            MissingIdentifyingKey {
                entity: entity.into().into(),
                key: key.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is a missing identifying key error.
    pub fn is_missing_identifying_key(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::MissingIdentifyingKey(_)))
    }
}
