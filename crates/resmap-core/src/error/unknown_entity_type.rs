use super::Error;

#[derive(Debug)]
pub(super) struct UnknownEntityType {
    name: Box<str>,
}

impl std::error::Error for UnknownEntityType {}

impl core::fmt::Display for UnknownEntityType {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unknown entity type `{}`", self.name)
    }
}

impl Error {
    /// Creates an unknown entity type error.
    pub fn unknown_entity_type(name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownEntityType(UnknownEntityType {
            name: name.into().into(),
        }))
    }

    /// Returns `true` if this error is an unknown entity type error.
    pub fn is_unknown_entity_type(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::UnknownEntityType(_)))
    }
}
