//! Enum parsing logic.
//!
//! Only enums whose variants carry no data are documented; their visible
//! variant names become the permitted values of any member of that type.

use darling::{FromDeriveInput, FromVariant};
use proc_macro2::Span;
use syn::{Data, DeriveInput, Fields};

use crate::ir::{SchemaIR, SchemaKind};
use crate::parser::attributes::{ContainerAttrs, VariantAttrs};

#[cfg(feature = "serde-compat")]
use crate::parser::serde_compat::{SerdeContainerAttrs, SerdeVariantAttrs};

/// Error type for enum parsing failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EnumParseError {
    #[error("Failed to parse container attributes: {0}")]
    ContainerAttrs(String),

    #[error("Failed to parse attributes of variant `{variant}`: {message}")]
    VariantAttrs {
        variant: String,
        message: String,
        span: Span,
    },

    #[error("Variant `{variant}` carries data; only unit variants can be documented")]
    DataVariant { variant: String, span: Span },

    #[error("Expected enum, found {0}")]
    NotAnEnum(String),
}

impl EnumParseError {
    /// Source location the error should point at, if narrower than the type.
    pub fn span(&self) -> Option<Span> {
        match self {
            EnumParseError::VariantAttrs { span, .. } | EnumParseError::DataVariant { span, .. } => {
                Some(*span)
            }
            _ => None,
        }
    }
}

/// Parses Rust enum definitions into SchemaIR.
pub struct EnumParser;

impl EnumParser {
    /// Parse a DeriveInput into a SchemaIR.
    pub fn parse(input: &DeriveInput) -> Result<SchemaIR, EnumParseError> {
        let container_attrs = ContainerAttrs::from_derive_input(input)
            .map_err(|e| EnumParseError::ContainerAttrs(e.to_string()))?;

        // Merge rename_all: apiduck takes precedence over serde
        #[cfg(feature = "serde-compat")]
        let rename_all = container_attrs
            .rename_all
            .or(SerdeContainerAttrs::from_attrs(&input.attrs).rename_all);

        #[cfg(not(feature = "serde-compat"))]
        let rename_all = container_attrs.rename_all;

        let data_enum = match &input.data {
            Data::Enum(e) => e,
            Data::Struct(_) => return Err(EnumParseError::NotAnEnum("struct".to_string())),
            Data::Union(_) => return Err(EnumParseError::NotAnEnum("union".to_string())),
        };

        let mut names = Vec::with_capacity(data_enum.variants.len());

        for variant in &data_enum.variants {
            let variant_attrs =
                VariantAttrs::from_variant(variant).map_err(|e| EnumParseError::VariantAttrs {
                    variant: variant.ident.to_string(),
                    message: e.to_string(),
                    span: variant.ident.span(),
                })?;

            #[cfg(feature = "serde-compat")]
            let serde_variant_attrs = SerdeVariantAttrs::from_attrs(&variant.attrs);

            #[cfg(feature = "serde-compat")]
            let should_skip = variant_attrs.skip || serde_variant_attrs.skip;

            #[cfg(not(feature = "serde-compat"))]
            let should_skip = variant_attrs.skip;

            if should_skip {
                continue;
            }

            if !matches!(variant.fields, Fields::Unit) {
                return Err(EnumParseError::DataVariant {
                    variant: variant.ident.to_string(),
                    span: variant.ident.span(),
                });
            }

            // Priority: apiduck rename > serde rename > rename_all rule > original name
            #[cfg(feature = "serde-compat")]
            let name = match (&variant_attrs.rename, &serde_variant_attrs.rename) {
                (None, Some(serde_rename)) => serde_rename.clone(),
                _ => variant_attrs.schema_name(rename_all),
            };

            #[cfg(not(feature = "serde-compat"))]
            let name = variant_attrs.schema_name(rename_all);

            names.push(name);
        }

        Ok(SchemaIR::new(container_attrs.ident, SchemaKind::Enum(names))
            .with_label(container_attrs.rename)
            .with_generics(container_attrs.generics))
    }
}
