use crate::{Error, Result, Value};

use indexmap::IndexMap;
use serde_json::Value as Json;
use std::sync::Arc;

/// Converts between wire values and the typed value of a transformable
/// attribute.
pub trait Converter: Send + Sync {
    fn decode(&self, wire: &Json) -> Result<Value>;

    fn encode(&self, value: &Value) -> Result<Json>;
}

/// Converters for transformable attributes, keyed by representation name.
#[derive(Clone, Default)]
pub struct Converters {
    by_repr: IndexMap<String, Arc<dyn Converter>>,
}

impl Converters {
    pub fn register(
        &mut self,
        repr: impl Into<String>,
        converter: impl Converter + 'static,
    ) -> &mut Self {
        self.by_repr.insert(repr.into(), Arc::new(converter));
        self
    }

    pub fn get(&self, repr: &str) -> Result<&dyn Converter> {
        self.by_repr
            .get(repr)
            .map(|converter| &**converter)
            .ok_or_else(|| Error::no_converter_registered(repr))
    }

    pub fn contains(&self, repr: &str) -> bool {
        self.by_repr.contains_key(repr)
    }
}

impl core::fmt::Debug for Converters {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_set().entries(self.by_repr.keys()).finish()
    }
}
