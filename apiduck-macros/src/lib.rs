//! # apiduck-macros
//!
//! Procedural macros for deriving apiduck documentation schemas.
//!
//! This crate provides the `#[derive(ApiSchema)]` macro that implements
//! `apiduck::ApiSchema` for structs and unit-only enums. Use it through the
//! `apiduck` crate, which re-exports it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use apiduck::ApiSchema;
//!
//! #[derive(ApiSchema)]
//! #[apiduck(rename_all = "camelCase")]
//! pub struct CreateUser {
//!     /// Display name
//!     #[apiduck(validate = "required,min=2,max=100")]
//!     pub user_name: String,
//!
//!     #[apiduck(meta = "desc=Age in years,example=25")]
//!     pub age: u32,
//!
//!     #[apiduck(enum("admin", "user"), default = "user")]
//!     pub role: String,
//! }
//! ```
//!
//! ## Attributes
//!
//! ### Container Attributes (on struct/enum)
//!
//! - `#[apiduck(rename = "Name")]` - Type label shown in documentation
//! - `#[apiduck(rename_all = "camelCase")]` - Rename all fields or variants
//!
//! ### Field Attributes
//!
//! - `#[apiduck(rename = "name")]` - Rename this field
//! - `#[apiduck(skip)]` - Skip this field
//! - `#[apiduck(validate = "...")]` - Validation rule string
//! - `#[apiduck(meta = "...")]` - Documentation pair string
//! - `#[apiduck(desc = "...")]`, `default`, `example` - Documentation values
//! - `#[apiduck(enum(...))]` - Permitted values
//! - `#[apiduck(required)]`, `min = N`, `max = N` - Validation values
//!
//! ### Variant Attributes
//!
//! - `#[apiduck(rename = "name")]` - Rename this variant
//! - `#[apiduck(skip)]` - Skip this variant

use proc_macro::TokenStream;
use syn::{Data, DeriveInput};

mod codegen;
mod ir;
mod parser;

use codegen::ImplBlockGenerator;
use parser::enum_parser::{EnumParseError, EnumParser};
use parser::struct_parser::{StructParseError, StructParser};

/// Derive macro for describing a type to the apiduck schema walker.
///
/// # Example
///
/// ```rust,ignore
/// use apiduck::ApiSchema;
///
/// #[derive(ApiSchema)]
/// pub struct User {
///     pub name: String,
///     pub age: u32,
/// }
/// ```
#[proc_macro_derive(ApiSchema, attributes(apiduck, serde))]
pub fn derive_api_schema(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);

    match derive_api_schema_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Internal implementation of the derive macro.
///
/// This function routes to the appropriate parser based on the input type
/// (struct or enum) and generates the impl block.
fn derive_api_schema_impl(input: &DeriveInput) -> Result<proc_macro2::TokenStream, syn::Error> {
    // Route to the appropriate parser based on the data type
    let schema_ir = match &input.data {
        Data::Struct(_) => StructParser::parse(input).map_err(|e| convert_parse_error(e, input))?,
        Data::Enum(_) => {
            EnumParser::parse(input).map_err(|e| convert_enum_parse_error(e, input))?
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "ApiSchema cannot be derived for unions",
            ));
        }
    };

    // Generate the impl block
    let generator = ImplBlockGenerator::new();
    Ok(generator.generate(&schema_ir))
}

/// Convert a StructParseError to a syn::Error with proper span information.
fn convert_parse_error(error: StructParseError, input: &DeriveInput) -> syn::Error {
    match error.span() {
        Some(span) => syn::Error::new(span, error),
        None => syn::Error::new_spanned(&input.ident, error),
    }
}

/// Convert an EnumParseError to a syn::Error with proper span information.
fn convert_enum_parse_error(error: EnumParseError, input: &DeriveInput) -> syn::Error {
    match error.span() {
        Some(span) => syn::Error::new(span, error),
        None => syn::Error::new_spanned(&input.ident, error),
    }
}
