//! Intermediate Representation (IR) module.
//!
//! The parsers turn a `DeriveInput` into these structures; the code
//! generator turns them into an `ApiSchema` implementation.

pub mod metadata;
pub mod schema;

pub use metadata::FieldMetadata;
pub use schema::{FieldIR, SchemaIR, SchemaKind};
