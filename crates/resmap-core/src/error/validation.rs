use super::Error;

/// Error when a required attribute or relationship produces no value.
#[derive(Debug)]
pub(super) struct ValidationFailure {
    field: Box<str>,
}

impl std::error::Error for ValidationFailure {}

impl core::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "required field `{}` has no value", self.field)
    }
}

impl Error {
    /// Creates a validation failure for the named field.
    pub fn validation_failure(field: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Validation(ValidationFailure {
            field: field.into().into(),
        }))
    }

    /// Returns `true` if this error is a validation failure.
    pub fn is_validation_failure(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::Validation(_)))
    }
}
