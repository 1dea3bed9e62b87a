//! Schema IR definitions.
//!
//! This module defines the root structures that represent a parsed type
//! definition: a struct with documented members or a unit-only enum.

use syn::{Generics, Ident, Type};

use super::metadata::FieldMetadata;

/// Root schema IR for a type definition.
#[derive(Debug, Clone)]
pub struct SchemaIR {
    /// Type identifier
    pub ident: Ident,

    /// Label override from `#[apiduck(rename = "...")]`
    pub label: Option<String>,

    /// Generic parameters as declared
    pub generics: Generics,

    /// Schema kind
    pub kind: SchemaKind,
}

impl SchemaIR {
    /// Create a new SchemaIR for the given type.
    pub fn new(ident: Ident, kind: SchemaKind) -> Self {
        Self {
            ident,
            label: None,
            generics: Generics::default(),
            kind,
        }
    }

    /// Override the type label.
    pub fn with_label(mut self, label: Option<String>) -> Self {
        self.label = label;
        self
    }

    /// Set the generic parameters.
    pub fn with_generics(mut self, generics: Generics) -> Self {
        self.generics = generics;
        self
    }
}

/// The kind of schema.
#[derive(Debug, Clone)]
pub enum SchemaKind {
    /// Struct with documented members. Tuple and unit structs have none.
    Struct(Vec<FieldIR>),

    /// Enum whose variants carry no data; holds the visible variant names.
    Enum(Vec<String>),
}

/// One documented struct member.
#[derive(Debug, Clone)]
pub struct FieldIR {
    /// Externally visible name
    pub name: String,

    /// Declared type
    pub ty: Type,

    /// Parsed metadata
    pub metadata: FieldMetadata,
}

impl FieldIR {
    /// Create a member with no metadata.
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            metadata: FieldMetadata::default(),
        }
    }

    /// Set the metadata.
    pub fn with_metadata(mut self, metadata: FieldMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}
