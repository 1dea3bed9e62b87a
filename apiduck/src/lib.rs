//! # apiduck
//!
//! Derive API documentation from the Rust types your handlers already use.
//!
//! This crate provides the runtime half of apiduck: the [`ApiSchema`] trait,
//! the schema walker that turns a type into a tree of [`Field`]s, and the
//! documentation model those trees are embedded into. Use the
//! `#[derive(ApiSchema)]` procedural macro to describe your request and
//! response structs.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use apiduck::ApiSchema;
//!
//! #[derive(ApiSchema)]
//! pub struct CreateUser {
//!     #[apiduck(validate = "required,min=2,max=100")]
//!     pub name: String,
//!     pub age: u32,
//!     pub tags: Vec<String>,
//! }
//!
//! let fields = apiduck::fields_of::<CreateUser>();
//! assert_eq!(fields[0].name, "name");
//! assert!(fields[0].required);
//! assert_eq!(fields[2].type_name, "[]string");
//! ```
//!
//! ## Features
//!
//! | Feature | Description | Default |
//! |---------|-------------|---------|
//! | `derive` | `#[derive(ApiSchema)]` | ✅ |
//! | `uuid` | Support for `uuid::Uuid` | ❌ |
//!
//! The macro crate's `serde-compat` feature (default) makes the derive read
//! `#[serde(rename, rename_all, skip, ...)]` attributes.
//!
//! ## Container Attributes
//!
//! | Attribute | Description |
//! |-----------|-------------|
//! | `#[apiduck(rename = "Name")]` | Type label shown for this type |
//! | `#[apiduck(rename_all = "camelCase")]` | Rename all members using a naming convention |
//!
//! ## Field Attributes
//!
//! | Attribute | Description |
//! |-----------|-------------|
//! | `#[apiduck(rename = "name")]` | Visible name of this member |
//! | `#[apiduck(skip)]` | Leave this member out |
//! | `#[apiduck(validate = "required,min=1,oneof=a b")]` | Validation rule string |
//! | `#[apiduck(meta = "desc=...,default=...,example=...")]` | Documentation string |
//! | `#[apiduck(desc = "...")]` | Description |
//! | `#[apiduck(default = "...")]` | Default literal |
//! | `#[apiduck(example = "...")]` | Example literal |
//! | `#[apiduck(enum("a", "b"))]` | Permitted values |
//! | `#[apiduck(required)]` | Mark mandatory |
//! | `#[apiduck(min = 1, max = 10)]` | Bounds |
//!
//! Doc comments on a member are used as its description unless one is given
//! explicitly. Only `pub` members are documented.
//!
//! ## Type Labels
//!
//! | Rust Type | Label |
//! |-----------|-------|
//! | `String`, `&str`, `Cow<str>` | `string` |
//! | `bool`, `char`, integers, floats | the Rust name (`bool`, `i64`, `f32`, ...) |
//! | `Option<T>`, `Box<T>`, `Rc<T>`, `Arc<T>`, `&T` | label of `T` |
//! | `Vec<T>`, `[T]`, `[T; N]`, `VecDeque<T>`, sets | `[]` + label of `T` |
//! | `HashMap<K, V>`, `BTreeMap<K, V>` | `map<K, V>` |
//! | `serde_json::Value` | `any` |
//! | `chrono::DateTime<Tz>`, `NaiveDate`, ... | the short type name |
//! | derived types | the short type name (`User`, `Page<User>`) |
//!
//! ## Documentation Sets
//!
//! ```rust,ignore
//! use apiduck::{ApiDocumentation, Endpoint, Info, Method, Response};
//!
//! let mut docs = ApiDocumentation::new(Info::new("User API", "1.0.0"));
//! docs.tag("Users").add_endpoint(
//!     Endpoint::new(Method::Post, "/users", "Create user")
//!         .with_body::<CreateUser>()
//!         .with_response(Response::for_status(201).with_schema::<User>()),
//! );
//!
//! let json = docs.export()?;
//! ```

// Generated code names this crate by its absolute path.
extern crate self as apiduck;

pub mod document;
pub mod error;
pub mod export;
pub mod field;
pub mod status;
pub mod traits;
pub mod type_name;
pub mod walker;

// Re-export main trait
pub use traits::{ApiSchema, Kind};

pub use document::{
    ApiDocumentation, Endpoint, Example, FormField, Header, Info, InfoContact, InfoLicense,
    Method, ParamValidation, QueryParam, Response, Security, SecurityLocation, SecurityType,
    Server, Tag,
};
pub use error::{Error, Result};
pub use export::ExportConfig;
pub use field::{coerce_literal, Field, FieldDecl};
pub use status::status_message;
pub use type_name::short_name;
pub use walker::{derive, fields_of, Walker, RECURSIVE_MARKER};

#[doc(hidden)]
pub mod __private {
    pub use serde_json::Value;
}

// Re-export derive macro when available
#[cfg(feature = "derive")]
pub use apiduck_macros::ApiSchema;
