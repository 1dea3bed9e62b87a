//! Serde attribute compatibility.
//!
//! This module handles parsing serde attributes when the `serde-compat`
//! feature is enabled, so documented names follow the wire format. apiduck
//! attributes take precedence when both are present.

use syn::meta::ParseNestedMeta;
use syn::Attribute;

use super::attributes::RenameRule;

/// Serde container attributes extracted from `#[serde(...)]`.
#[derive(Debug, Clone, Default)]
pub struct SerdeContainerAttrs {
    /// Rename all fields or variants using a case convention
    pub rename_all: Option<RenameRule>,
}

impl SerdeContainerAttrs {
    /// Parse serde attributes from a list of attributes.
    pub fn from_attrs(attrs: &[Attribute]) -> Self {
        let mut result = Self::default();

        for attr in serde_attrs(attrs) {
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename_all") {
                    result.rename_all = rename_all_value(&meta)?;
                } else {
                    skip_value(&meta)?;
                }
                Ok(())
            });
        }

        result
    }
}

/// Serde field attributes extracted from `#[serde(...)]`.
#[derive(Debug, Clone, Default)]
pub struct SerdeFieldAttrs {
    /// Rename this field
    pub rename: Option<String>,

    /// Skip this field
    pub skip: bool,

    /// Skip serializing this field
    pub skip_serializing: bool,

    /// Skip deserializing this field
    pub skip_deserializing: bool,
}

impl SerdeFieldAttrs {
    /// Parse serde attributes from a list of attributes.
    pub fn from_attrs(attrs: &[Attribute]) -> Self {
        let mut result = Self::default();

        for attr in serde_attrs(attrs) {
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    result.rename = rename_value(&meta)?;
                } else if meta.path.is_ident("skip") {
                    result.skip = true;
                } else if meta.path.is_ident("skip_serializing") {
                    result.skip_serializing = true;
                } else if meta.path.is_ident("skip_deserializing") {
                    result.skip_deserializing = true;
                } else {
                    skip_value(&meta)?;
                }
                Ok(())
            });
        }

        result
    }

    /// Check if this field should be left out of the documentation.
    ///
    /// A field skipped in either direction is not part of the data contract.
    pub fn should_skip(&self) -> bool {
        self.skip || self.skip_serializing || self.skip_deserializing
    }
}

/// Serde variant attributes extracted from `#[serde(...)]`.
#[derive(Debug, Clone, Default)]
pub struct SerdeVariantAttrs {
    /// Rename this variant
    pub rename: Option<String>,

    /// Skip this variant
    pub skip: bool,
}

impl SerdeVariantAttrs {
    /// Parse serde attributes from a list of attributes.
    pub fn from_attrs(attrs: &[Attribute]) -> Self {
        let mut result = Self::default();

        for attr in serde_attrs(attrs) {
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    result.rename = rename_value(&meta)?;
                } else if meta.path.is_ident("skip") {
                    result.skip = true;
                } else {
                    skip_value(&meta)?;
                }
                Ok(())
            });
        }

        result
    }
}

fn serde_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|attr| attr.path().is_ident("serde"))
}

/// Parse `rename = "value"`, or the serialize side of
/// `rename(serialize = "...", deserialize = "...")`.
fn rename_value(meta: &ParseNestedMeta) -> syn::Result<Option<String>> {
    if meta.input.peek(syn::Token![=]) {
        let value: syn::LitStr = meta.value()?.parse()?;
        return Ok(Some(value.value()));
    }

    let mut result = None;
    meta.parse_nested_meta(|nested| {
        if nested.path.is_ident("serialize") {
            let value: syn::LitStr = nested.value()?.parse()?;
            result = Some(value.value());
        } else {
            skip_value(&nested)?;
        }
        Ok(())
    })?;
    Ok(result)
}

/// Parse `rename_all = "..."` (or its serialize side) into a rule.
fn rename_all_value(meta: &ParseNestedMeta) -> syn::Result<Option<RenameRule>> {
    Ok(rename_value(meta)?.and_then(|name| RenameRule::from_name(&name)))
}

/// Consume the value of a serde key this crate does not interpret.
fn skip_value(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(syn::Token![=]) {
        let _: syn::Expr = meta.value()?.parse()?;
    } else if meta.input.peek(syn::token::Paren) {
        meta.parse_nested_meta(|nested| skip_value(&nested))?;
    }
    Ok(())
}
