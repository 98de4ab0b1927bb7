pub mod coerce;

mod error;
pub use error::{Error, IntoError};

pub mod resource;

pub mod schema;
pub use schema::Schema;

mod value;
pub use value::{Opaque, Value};

/// A Result type alias that uses resmap's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use serde_json::Value as Json;
