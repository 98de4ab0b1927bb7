use super::Error;

/// Error when the mapper registry has no entry for a lookup.
#[derive(Debug)]
pub(super) struct NoMapperRegistered {
    lookup: Box<str>,
}

impl std::error::Error for NoMapperRegistered {}

impl core::fmt::Display for NoMapperRegistered {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "no mapper registered for {}", self.lookup)
    }
}

impl Error {
    /// Creates a no mapper registered error.
    ///
    /// `lookup` describes what was looked up, e.g. ``resource type `person` ``.
    pub fn no_mapper_registered(lookup: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::NoMapperRegistered(NoMapperRegistered {
            lookup: lookup.into().into(),
        }))
    }

    /// Returns `true` if this error is a no mapper registered error.
    pub fn is_no_mapper_registered(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::NoMapperRegistered(_)))
    }
}
