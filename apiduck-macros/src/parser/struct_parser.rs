//! Struct parsing logic.
//!
//! This module handles parsing Rust struct definitions into IR.
//! It supports:
//! - Named structs; only `pub` members are documented
//! - Tuple and unit structs, which document no members
//! - Doc comment extraction
//! - Container and field attributes, including the metadata strings

use darling::{FromDeriveInput, FromField};
use proc_macro2::Span;
use syn::spanned::Spanned;
use syn::{Attribute, Data, DeriveInput, Fields, Lit, Meta};

use crate::ir::{FieldIR, FieldMetadata, SchemaIR, SchemaKind};
use crate::parser::attributes::{ContainerAttrs, FieldAttrs, RenameRule};
use crate::parser::rules::{apply_doc_meta, apply_validation, RuleError};

#[cfg(feature = "serde-compat")]
use crate::parser::serde_compat::{SerdeContainerAttrs, SerdeFieldAttrs};

/// Error type for struct parsing failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StructParseError {
    #[error("Failed to parse container attributes: {0}")]
    ContainerAttrs(String),

    #[error("Failed to parse attributes of field `{field}`: {message}")]
    FieldAttrs {
        field: String,
        message: String,
        span: Span,
    },

    #[error("Invalid metadata on field `{field}`: {source}")]
    Metadata {
        field: String,
        source: RuleError,
        span: Span,
    },

    #[error("Expected struct, found {0}")]
    NotAStruct(String),
}

impl StructParseError {
    /// Source location the error should point at, if narrower than the type.
    pub fn span(&self) -> Option<Span> {
        match self {
            StructParseError::FieldAttrs { span, .. } | StructParseError::Metadata { span, .. } => {
                Some(*span)
            }
            _ => None,
        }
    }
}

/// Parses Rust struct definitions into SchemaIR.
pub struct StructParser;

impl StructParser {
    /// Parse a DeriveInput into a SchemaIR.
    ///
    /// This is the main entry point for struct parsing.
    pub fn parse(input: &DeriveInput) -> Result<SchemaIR, StructParseError> {
        // Parse container attributes using darling
        let container_attrs = ContainerAttrs::from_derive_input(input)
            .map_err(|e| StructParseError::ContainerAttrs(e.to_string()))?;

        // Merge rename_all: apiduck takes precedence over serde
        #[cfg(feature = "serde-compat")]
        let effective_rename_all = container_attrs
            .rename_all
            .or(SerdeContainerAttrs::from_attrs(&input.attrs).rename_all);

        #[cfg(not(feature = "serde-compat"))]
        let effective_rename_all = container_attrs.rename_all;

        // Ensure we have a struct
        let data_struct = match &input.data {
            Data::Struct(s) => s,
            Data::Enum(_) => return Err(StructParseError::NotAStruct("enum".to_string())),
            Data::Union(_) => return Err(StructParseError::NotAStruct("union".to_string())),
        };

        let fields = match &data_struct.fields {
            Fields::Named(fields) => Self::parse_named_fields(fields, effective_rename_all)?,
            Fields::Unnamed(_) | Fields::Unit => Vec::new(),
        };

        Ok(SchemaIR::new(container_attrs.ident, SchemaKind::Struct(fields))
            .with_label(container_attrs.rename)
            .with_generics(container_attrs.generics))
    }

    /// Parse named struct fields into FieldIR, dropping excluded members.
    fn parse_named_fields(
        fields: &syn::FieldsNamed,
        rename_all: Option<RenameRule>,
    ) -> Result<Vec<FieldIR>, StructParseError> {
        let mut field_irs = Vec::with_capacity(fields.named.len());

        for field in &fields.named {
            let rust_name = field
                .ident
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default();

            // Parse field attributes using darling
            let field_attrs =
                FieldAttrs::from_field(field).map_err(|e| StructParseError::FieldAttrs {
                    field: rust_name.clone(),
                    message: e.to_string(),
                    span: field.span(),
                })?;

            #[cfg(feature = "serde-compat")]
            let serde_field_attrs = SerdeFieldAttrs::from_attrs(&field_attrs.attrs);

            // Skip fields marked with #[apiduck(skip)] or any serde skip
            #[cfg(feature = "serde-compat")]
            let should_skip = field_attrs.skip || serde_field_attrs.should_skip();

            #[cfg(not(feature = "serde-compat"))]
            let should_skip = field_attrs.skip;

            if should_skip || !field_attrs.is_public() {
                continue;
            }

            // Priority: apiduck rename > serde rename > rename_all rule > original name
            #[cfg(feature = "serde-compat")]
            let schema_name = match (&field_attrs.rename, &serde_field_attrs.rename) {
                (None, Some(serde_rename)) => serde_rename.clone(),
                _ => field_attrs.schema_name(rename_all),
            };

            #[cfg(not(feature = "serde-compat"))]
            let schema_name = field_attrs.schema_name(rename_all);

            if schema_name.is_empty() {
                continue;
            }

            let metadata = Self::parse_metadata(&field_attrs, &rust_name)?;

            field_irs.push(
                FieldIR::new(schema_name, field_attrs.ty.clone()).with_metadata(metadata),
            );
        }

        Ok(field_irs)
    }

    /// Collect a member's metadata.
    ///
    /// Sources are applied in order, later ones overriding earlier ones:
    /// doc comments, the validation string, the documentation string, then
    /// the typed attribute keys.
    fn parse_metadata(
        attrs: &FieldAttrs,
        rust_name: &str,
    ) -> Result<FieldMetadata, StructParseError> {
        let mut metadata = FieldMetadata {
            description: extract_doc_comments(&attrs.attrs),
            ..Default::default()
        };

        if let Some(rules) = &attrs.validate {
            apply_validation(&mut metadata, rules.as_str());
        }

        if let Some(pairs) = &attrs.meta {
            apply_doc_meta(&mut metadata, pairs.as_str()).map_err(|source| {
                StructParseError::Metadata {
                    field: rust_name.to_string(),
                    source,
                    span: pairs.span(),
                }
            })?;
        }

        if let Some(desc) = &attrs.desc {
            metadata.description = Some(desc.clone());
        }
        if let Some(default) = &attrs.default {
            metadata.default = Some(default.clone());
        }
        if let Some(example) = &attrs.example {
            metadata.example = Some(example.clone());
        }
        if let Some(values) = &attrs.enum_values {
            metadata.enum_values = values.0.clone();
        }
        if attrs.required {
            metadata.required = true;
        }
        if let Some(min) = &attrs.min {
            metadata.set_rule("min", min.0.clone());
        }
        if let Some(max) = &attrs.max {
            metadata.set_rule("max", max.0.clone());
        }

        Ok(metadata)
    }
}

/// Extract doc comments from attributes.
///
/// Doc comments in Rust are represented as `#[doc = "..."]` attributes.
/// This function extracts and concatenates them into a single description string.
pub fn extract_doc_comments(attrs: &[Attribute]) -> Option<String> {
    let doc_lines: Vec<String> = attrs
        .iter()
        .filter_map(|attr| {
            if !attr.path().is_ident("doc") {
                return None;
            }

            // Parse the doc attribute value
            if let Meta::NameValue(meta) = &attr.meta {
                if let syn::Expr::Lit(expr_lit) = &meta.value {
                    if let Lit::Str(lit_str) = &expr_lit.lit {
                        return Some(lit_str.value());
                    }
                }
            }
            None
        })
        .collect();

    if doc_lines.is_empty() {
        return None;
    }

    // Join doc lines, trimming leading whitespace from each line
    let description = doc_lines
        .iter()
        .map(|line| line.trim())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string();

    if description.is_empty() {
        None
    } else {
        Some(description)
    }
}
