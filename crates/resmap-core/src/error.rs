mod adhoc;
mod ambiguous_identity;
mod coercion;
mod conflicting_entity_type;
mod invalid_schema;
mod missing_identifying_key;
mod no_converter_registered;
mod no_mapper_registered;
mod unknown_entity_type;
mod unknown_resource_type;
mod validation;

use adhoc::AdhocError;
use ambiguous_identity::AmbiguousIdentity;
use coercion::CoercionError;
use conflicting_entity_type::ConflictingEntityType;
use invalid_schema::InvalidSchema;
use missing_identifying_key::MissingIdentifyingKey;
use no_converter_registered::NoConverterRegistered;
use no_mapper_registered::NoMapperRegistered;
use std::sync::Arc;
use unknown_entity_type::UnknownEntityType;
use unknown_resource_type::UnknownResourceType;
use validation::ValidationFailure;

/// Return early with an ad-hoc error built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Build an ad-hoc error from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error raised while introspecting a schema or mapping resources.
///
/// Errors are cheap to clone so the same failure can be reported both in a
/// per-record diagnostic list and in logs.
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Adds context to this error.
    ///
    /// Context is displayed in reverse order: the most recently added context is shown first,
    /// followed by earlier context, ending with the root cause.
    #[inline(always)]
    pub fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let mut kind = ErrorKind::Unknown;
        if let Some(inner) = consequent.inner {
            match Arc::try_unwrap(inner) {
                Ok(inner) => {
                    debug_assert!(
                        inner.cause.is_none(),
                        "consequent error must not already have a cause"
                    );
                    kind = inner.kind;
                }
                Err(shared) => {
                    kind = ErrorKind::Adhoc(AdhocError::new(shared.kind.to_string()));
                }
            }
        }

        Error {
            inner: Some(Arc::new(ErrorInner {
                kind,
                cause: Some(self),
            })),
        }
    }

    /// Returns the innermost error of the context chain.
    pub fn root(&self) -> &Error {
        // `chain` always yields at least `self`
        let mut root = self;
        for err in self.chain() {
            root = err;
        }
        root
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }

    /// Returns `true` if the error indicates a schema or registration bug
    /// rather than bad data.
    ///
    /// Configuration errors abort the current mapping call; data errors are
    /// collected as diagnostics.
    pub fn is_configuration(&self) -> bool {
        self.chain().any(|err| {
            matches!(
                err.kind(),
                ErrorKind::UnknownEntityType(_)
                    | ErrorKind::NoMapperRegistered(_)
                    | ErrorKind::NoConverterRegistered(_)
                    | ErrorKind::UnknownResourceType(_)
                    | ErrorKind::InvalidSchema(_)
            )
        })
    }

    /// Returns `true` if the error is fatal for the record being mapped.
    ///
    /// Configuration errors and ambiguous identities cannot be recovered by
    /// leaving a single field unset.
    pub fn is_fatal(&self) -> bool {
        self.is_configuration() || self.is_ambiguous_identity()
    }

    fn any_kind(&self, f: impl Fn(&ErrorKind) -> bool) -> bool {
        self.chain().any(|err| f(err.kind()))
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f.debug_struct("Error").field("kind", &"None").finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    AmbiguousIdentity(AmbiguousIdentity),
    Coercion(CoercionError),
    ConflictingEntityType(ConflictingEntityType),
    InvalidSchema(InvalidSchema),
    MissingIdentifyingKey(MissingIdentifyingKey),
    NoConverterRegistered(NoConverterRegistered),
    NoMapperRegistered(NoMapperRegistered),
    UnknownEntityType(UnknownEntityType),
    UnknownResourceType(UnknownResourceType),
    Validation(ValidationFailure),
    Unknown,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            AmbiguousIdentity(err) => core::fmt::Display::fmt(err, f),
            Coercion(err) => core::fmt::Display::fmt(err, f),
            ConflictingEntityType(err) => core::fmt::Display::fmt(err, f),
            InvalidSchema(err) => core::fmt::Display::fmt(err, f),
            MissingIdentifyingKey(err) => core::fmt::Display::fmt(err, f),
            NoConverterRegistered(err) => core::fmt::Display::fmt(err, f),
            NoMapperRegistered(err) => core::fmt::Display::fmt(err, f),
            UnknownEntityType(err) => core::fmt::Display::fmt(err, f),
            UnknownResourceType(err) => core::fmt::Display::fmt(err, f),
            Validation(err) => core::fmt::Display::fmt(err, f),
            Unknown => f.write_str("unknown resmap error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(Arc::new(ErrorInner { kind, cause: None })),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

/// Trait for types that can be converted into an Error.
pub trait IntoError {
    /// Converts this type into an Error.
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}

impl IntoError for &str {
    fn into_error(self) -> Error {
        Error::from(ErrorKind::Adhoc(AdhocError::new(self)))
    }
}

impl IntoError for String {
    fn into_error(self) -> Error {
        Error::from(ErrorKind::Adhoc(AdhocError::new(self)))
    }
}
