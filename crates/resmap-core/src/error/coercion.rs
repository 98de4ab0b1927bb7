use super::Error;

/// Error when a wire value is present but has the wrong shape for the
/// attribute kind it is decoded into (or a typed value cannot be encoded).
#[derive(Debug)]
pub(super) struct CoercionError {
    value: Box<str>,
    expected: Box<str>,
}

impl std::error::Error for CoercionError {}

impl core::fmt::Display for CoercionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "cannot coerce {} to {}", self.value, self.expected)
    }
}

impl Error {
    /// Creates a coercion error.
    ///
    /// `value` is a short rendering of the offending value, `expected` names
    /// the kind that was being produced.
    pub fn coercion(value: impl core::fmt::Display, expected: impl Into<String>) -> Error {
        let mut value = value.to_string();
        if value.len() > 64 {
            let mut end = 61;
            while !value.is_char_boundary(end) {
                end -= 1;
            }
            value.truncate(end);
            value.push_str("...");
        }

        Error::from(super::ErrorKind::Coercion(CoercionError {
            value: value.into(),
            expected: expected.into().into(),
        }))
    }

    /// Returns `true` if this error is a coercion error.
    pub fn is_coercion(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::Coercion(_)))
    }
}
