use super::Error;

/// Error when a transformable attribute names a representation that has no
/// registered converter.
#[derive(Debug)]
pub(super) struct NoConverterRegistered {
    repr: Box<str>,
}

impl std::error::Error for NoConverterRegistered {}

impl core::fmt::Display for NoConverterRegistered {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "no converter registered for `{}`", self.repr)
    }
}

impl Error {
    /// Creates a no converter registered error.
    pub fn no_converter_registered(repr: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::NoConverterRegistered(
            NoConverterRegistered {
                repr: repr.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is a no converter registered error.
    pub fn is_no_converter_registered(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::NoConverterRegistered(_)))
    }
}
