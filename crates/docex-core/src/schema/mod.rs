//! Schema editing and storage.

mod builder;
pub mod patterns;
mod registry;

pub use builder::{FieldUpdate, SchemaBuilder};
pub use registry::SchemaRegistry;
