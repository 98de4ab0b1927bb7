use std::any::Any;
use std::sync::Arc;

type Erased = dyn Any + Send + Sync;

/// A value owned by a registered converter.
///
/// The mapping engine never looks inside an opaque value; it only carries it
/// between the converter that produced it and the entity that stores it.
/// Equality is delegated to the wrapped type.
#[derive(Clone)]
pub struct Opaque {
    repr: Arc<str>,
    value: Arc<Erased>,
    eq: fn(&Erased, &Erased) -> bool,
}

impl Opaque {
    pub fn new<T>(repr: &str, value: T) -> Opaque
    where
        T: Any + Send + Sync + PartialEq,
    {
        fn eq<T: Any + PartialEq>(lhs: &Erased, rhs: &Erased) -> bool {
            match (lhs.downcast_ref::<T>(), rhs.downcast_ref::<T>()) {
                (Some(lhs), Some(rhs)) => lhs == rhs,
                _ => false,
            }
        }

        Opaque {
            repr: repr.into(),
            value: Arc::new(value),
            eq: eq::<T>,
        }
    }

    /// Name of the representation, matching the attribute's declared
    /// transformable representation.
    pub fn repr(&self) -> &str {
        &self.repr
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (*self.value).downcast_ref::<T>()
    }
}

impl PartialEq for Opaque {
    fn eq(&self, other: &Opaque) -> bool {
        self.repr == other.repr && (self.eq)(&*self.value, &*other.value)
    }
}

impl core::fmt::Debug for Opaque {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("Opaque")
            .field("repr", &self.repr)
            .finish_non_exhaustive()
    }
}
