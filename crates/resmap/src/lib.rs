mod batch;
pub use batch::{Batch, Failure};

mod context;
pub use context::{Context, ObjectId, Predicate, Related};

mod graph;
pub use graph::Graph;

pub mod mapper;
pub use mapper::{
    Diagnostic, EntityMapper, Inbound, Mapped, OrphanPolicy, Outbound, ResourceMapper, Serialized,
};

pub mod registry;
pub use registry::Registry;

pub mod resolve;
pub use resolve::{resolve, Identity, Resolved};

pub use resmap_core::{bail, err, schema, Error, Json, Result, Schema, Value};
pub use resmap_core::{coerce, resource};
