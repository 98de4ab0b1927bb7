use super::Error;

/// Error when a resource carries a type tag that no entity type declares.
#[derive(Debug)]
pub(super) struct UnknownResourceType {
    tag: Box<str>,
}

impl std::error::Error for UnknownResourceType {}

impl core::fmt::Display for UnknownResourceType {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unknown resource type `{}`", self.tag)
    }
}

impl Error {
    /// Creates an unknown resource type error.
    pub fn unknown_resource_type(tag: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownResourceType(UnknownResourceType {
            tag: tag.into().into(),
        }))
    }

    /// Returns `true` if this error is an unknown resource type error.
    pub fn is_unknown_resource_type(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::UnknownResourceType(_)))
    }
}
