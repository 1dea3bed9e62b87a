//! Attribute parsing using darling for ergonomic derive macro attributes.
//!
//! This module defines the attribute structures for `#[apiduck(...)]`
//! attributes on containers (structs/enums), fields, and variants.

use darling::ast::NestedMeta;
use darling::util::SpannedValue;
use darling::{FromDeriveInput, FromField, FromMeta, FromVariant};
use syn::ext::IdentExt;
use syn::{Attribute, Expr, ExprLit, ExprUnary, Generics, Ident, Lit, Type, UnOp, Visibility};

use super::rules::split_list;

/// Container-level attributes for structs and enums.
/// Parsed from `#[apiduck(...)]` on the type definition.
#[derive(Debug, Clone, FromDeriveInput)]
#[darling(attributes(apiduck), supports(struct_any, enum_any))]
pub struct ContainerAttrs {
    /// The identifier of the type
    pub ident: Ident,

    /// Generic parameters of the type
    pub generics: Generics,

    /// Type label shown in documentation
    #[darling(default)]
    pub rename: Option<String>,

    /// Rename all fields using a case convention
    #[darling(default)]
    pub rename_all: Option<RenameRule>,
}

/// Field-level attributes parsed from `#[apiduck(...)]` on struct fields.
///
/// Doc comments and serde attributes are forwarded untouched so the struct
/// parser can read them.
#[derive(Debug, Clone, FromField)]
#[darling(attributes(apiduck), forward_attrs(doc, serde))]
pub struct FieldAttrs {
    /// Field identifier (None for tuple struct fields)
    pub ident: Option<Ident>,

    /// Field type
    pub ty: Type,

    /// Field visibility
    pub vis: Visibility,

    /// Forwarded `doc` and `serde` attributes
    pub attrs: Vec<Attribute>,

    /// Rename this field
    #[darling(default)]
    pub rename: Option<String>,

    /// Leave this field out
    #[darling(default)]
    pub skip: bool,

    /// Validation rule string
    #[darling(default)]
    pub validate: Option<SpannedValue<String>>,

    /// Documentation pair string
    #[darling(default)]
    pub meta: Option<SpannedValue<String>>,

    /// Description
    #[darling(default)]
    pub desc: Option<String>,

    /// Default literal
    #[darling(default)]
    pub default: Option<String>,

    /// Example literal
    #[darling(default)]
    pub example: Option<String>,

    /// Permitted values
    #[darling(default, rename = "enum")]
    pub enum_values: Option<EnumValues>,

    /// Mark as mandatory
    #[darling(default)]
    pub required: bool,

    /// Lower bound
    #[darling(default)]
    pub min: Option<RuleValue>,

    /// Upper bound
    #[darling(default)]
    pub max: Option<RuleValue>,
}

impl FieldAttrs {
    /// Get the visible name for this field (renamed or original).
    pub fn schema_name(&self, rename_rule: Option<RenameRule>) -> String {
        // Explicit rename takes precedence
        if let Some(ref name) = self.rename {
            return name.clone();
        }

        // Apply rename_all rule if present
        if let Some(ident) = &self.ident {
            let name = ident.unraw().to_string();
            if let Some(rule) = rename_rule {
                rule.apply(&name)
            } else {
                name
            }
        } else {
            String::new()
        }
    }

    /// Check if the field is visible outside its module.
    pub fn is_public(&self) -> bool {
        matches!(self.vis, Visibility::Public(_))
    }
}

/// Variant-level attributes for enum variants.
#[derive(Debug, Clone, FromVariant)]
#[darling(attributes(apiduck))]
pub struct VariantAttrs {
    /// Variant identifier
    pub ident: Ident,

    /// Rename this variant
    #[darling(default)]
    pub rename: Option<String>,

    /// Skip this variant
    #[darling(default)]
    pub skip: bool,
}

impl VariantAttrs {
    /// Get the visible name for this variant (renamed or original).
    pub fn schema_name(&self, rename_rule: Option<RenameRule>) -> String {
        // Explicit rename takes precedence
        if let Some(ref name) = self.rename {
            return name.clone();
        }

        // Apply rename_all rule if present
        let name = self.ident.to_string();
        if let Some(rule) = rename_rule {
            rule.apply(&name)
        } else {
            name
        }
    }
}

/// Permitted values, written as `enum("a", "b")` or `enum = "a b"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumValues(pub Vec<String>);

impl FromMeta for EnumValues {
    fn from_list(items: &[NestedMeta]) -> darling::Result<Self> {
        items
            .iter()
            .map(|item| match item {
                NestedMeta::Lit(lit) => literal_text(lit),
                NestedMeta::Meta(_) => Err(darling::Error::custom("expected a literal value")),
            })
            .collect::<darling::Result<Vec<_>>>()
            .map(EnumValues)
    }

    fn from_string(value: &str) -> darling::Result<Self> {
        Ok(EnumValues(split_list(value)))
    }
}

/// A rule argument written as a string, integer or float literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleValue(pub String);

impl FromMeta for RuleValue {
    fn from_value(value: &Lit) -> darling::Result<Self> {
        literal_text(value).map(RuleValue)
    }

    /// Accepts negated numbers (`min = -40`) besides plain literals.
    fn from_expr(expr: &Expr) -> darling::Result<Self> {
        match expr {
            Expr::Lit(ExprLit { lit, .. }) => Self::from_value(lit),
            Expr::Group(group) => Self::from_expr(&group.expr),
            Expr::Unary(ExprUnary {
                op: UnOp::Neg(_),
                expr: operand,
                ..
            }) => match operand.as_ref() {
                Expr::Lit(ExprLit {
                    lit: lit @ (Lit::Int(_) | Lit::Float(_)),
                    ..
                }) => literal_text(lit).map(|text| RuleValue(format!("-{text}"))),
                _ => Err(darling::Error::unexpected_expr_type(expr)),
            },
            _ => Err(darling::Error::unexpected_expr_type(expr)),
        }
    }
}

/// Textual form of a literal, as it would appear in a metadata string.
fn literal_text(lit: &Lit) -> darling::Result<String> {
    match lit {
        Lit::Str(s) => Ok(s.value()),
        Lit::Int(i) => Ok(i.base10_digits().to_string()),
        Lit::Float(f) => Ok(f.base10_digits().to_string()),
        Lit::Bool(b) => Ok(b.value.to_string()),
        other => Err(darling::Error::unexpected_lit_type(other)),
    }
}

/// Rename rule for field/variant name transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameRule {
    /// lowercase
    LowerCase,

    /// UPPERCASE
    UpperCase,

    /// camelCase
    CamelCase,

    /// snake_case
    SnakeCase,

    /// PascalCase
    PascalCase,

    /// SCREAMING_SNAKE_CASE
    ScreamingSnakeCase,

    /// kebab-case
    KebabCase,

    /// SCREAMING-KEBAB-CASE
    ScreamingKebabCase,
}

impl FromMeta for RenameRule {
    fn from_string(value: &str) -> darling::Result<Self> {
        RenameRule::from_name(value)
            .ok_or_else(|| darling::Error::custom(format!("unknown rename rule `{value}`")))
    }
}

impl RenameRule {
    /// Parse a serde-style convention name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "lowercase" => Some(RenameRule::LowerCase),
            "UPPERCASE" => Some(RenameRule::UpperCase),
            "camelCase" => Some(RenameRule::CamelCase),
            "snake_case" => Some(RenameRule::SnakeCase),
            "PascalCase" => Some(RenameRule::PascalCase),
            "SCREAMING_SNAKE_CASE" => Some(RenameRule::ScreamingSnakeCase),
            "kebab-case" => Some(RenameRule::KebabCase),
            "SCREAMING-KEBAB-CASE" => Some(RenameRule::ScreamingKebabCase),
            _ => None,
        }
    }

    /// Apply the rename rule to a string.
    pub fn apply(&self, name: &str) -> String {
        use convert_case::{Case, Casing};

        match self {
            RenameRule::LowerCase => name.to_lowercase(),
            RenameRule::UpperCase => name.to_uppercase(),
            RenameRule::CamelCase => name.to_case(Case::Camel),
            RenameRule::SnakeCase => name.to_case(Case::Snake),
            RenameRule::PascalCase => name.to_case(Case::Pascal),
            RenameRule::ScreamingSnakeCase => name.to_case(Case::UpperSnake),
            RenameRule::KebabCase => name.to_case(Case::Kebab),
            RenameRule::ScreamingKebabCase => name.to_case(Case::Kebab).to_uppercase(),
        }
    }
}
