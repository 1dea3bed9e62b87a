//! Impl block generation for the ApiSchema trait.
//!
//! This module generates the `impl ApiSchema for Type` blocks that are
//! emitted by the derive macro.

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_quote, GenericParam, Generics};

use crate::ir::{FieldIR, SchemaIR, SchemaKind};

/// Generates the impl block for the ApiSchema trait.
#[derive(Debug, Default)]
pub struct ImplBlockGenerator;

impl ImplBlockGenerator {
    /// Create a new ImplBlockGenerator.
    pub fn new() -> Self {
        Self
    }

    /// Generate the complete impl block for a schema.
    pub fn generate(&self, schema: &SchemaIR) -> TokenStream {
        let name = &schema.ident;
        let generics = self.bounded_generics(&schema.generics);
        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

        let type_label = self.generate_type_label(schema);
        let body = match &schema.kind {
            SchemaKind::Struct(fields) => self.generate_struct_methods(fields),
            SchemaKind::Enum(variants) => self.generate_enum_methods(variants),
        };

        quote! {
            #[automatically_derived]
            impl #impl_generics ::apiduck::ApiSchema for #name #ty_generics #where_clause {
                #type_label

                #body
            }
        }
    }

    /// Require `ApiSchema` of every type parameter.
    fn bounded_generics(&self, generics: &Generics) -> Generics {
        let mut generics = generics.clone();
        for param in generics.type_params_mut() {
            param.bounds.push(parse_quote!(::apiduck::ApiSchema));
        }
        generics
    }

    /// Generate the type_label() method.
    ///
    /// Generic types are labelled from their arguments' own labels, so
    /// `Page<String>` reads `Page<string>` like a member of that type would.
    fn generate_type_label(&self, schema: &SchemaIR) -> TokenStream {
        let args: Vec<TokenStream> = schema
            .generics
            .params
            .iter()
            .filter_map(|param| match param {
                GenericParam::Type(param) => {
                    let ident = &param.ident;
                    Some(quote! { <#ident as ::apiduck::ApiSchema>::type_label() })
                }
                GenericParam::Const(param) => {
                    let ident = &param.ident;
                    Some(quote! { ::std::string::ToString::to_string(&#ident) })
                }
                GenericParam::Lifetime(_) => None,
            })
            .collect();

        let label = match &schema.label {
            Some(label) => quote! { ::std::string::String::from(#label) },
            None if args.is_empty() => {
                quote! { ::apiduck::short_name(::core::any::type_name::<Self>()) }
            }
            None => {
                let base = schema.ident.unraw().to_string();
                quote! { ::std::format!("{}<{}>", #base, [#(#args),*].join(", ")) }
            }
        };

        quote! {
            fn type_label() -> ::std::string::String {
                #label
            }
        }
    }

    /// Generate kind() and describe() for a struct.
    fn generate_struct_methods(&self, fields: &[FieldIR]) -> TokenStream {
        let build = if fields.is_empty() {
            quote! { |_| ::std::vec::Vec::new() }
        } else {
            let members = fields.iter().map(|field| self.generate_member(field));
            quote! { |walker| ::std::vec![#(#members),*] }
        };

        quote! {
            fn kind() -> ::apiduck::Kind {
                ::apiduck::Kind::Aggregate
            }

            fn describe(walker: &mut ::apiduck::Walker) -> ::std::vec::Vec<::apiduck::Field> {
                walker.aggregate::<Self, _>(#build)
            }
        }
    }

    /// Generate the walker call for one member.
    fn generate_member(&self, field: &FieldIR) -> TokenStream {
        let ty = &field.ty;
        let name = &field.name;
        let metadata = &field.metadata;

        let description = metadata
            .description
            .as_ref()
            .map(|d| quote! { .description(#d) });
        let required = metadata.required.then(|| quote! { .required() });
        let rules = metadata
            .validation
            .iter()
            .map(|(key, value)| quote! { .rule(#key, #value) });
        let enum_values = metadata
            .enum_values
            .iter()
            .map(|value| quote! { .enum_value(#value) });
        let default = metadata
            .default
            .as_ref()
            .map(|d| quote! { .default_literal(#d) });
        let example = metadata
            .example
            .as_ref()
            .map(|e| quote! { .example_literal(#e) });

        quote! {
            walker.member::<#ty>(
                ::apiduck::FieldDecl::new(#name)
                    #description
                    #required
                    #(#rules)*
                    #(#enum_values)*
                    #default
                    #example
            )
        }
    }

    /// Generate kind() and enum_values() for a unit-only enum.
    fn generate_enum_methods(&self, variants: &[String]) -> TokenStream {
        quote! {
            fn kind() -> ::apiduck::Kind {
                ::apiduck::Kind::Enumeration
            }

            fn enum_values() -> ::std::vec::Vec<::apiduck::__private::Value> {
                ::std::vec![
                    #(::apiduck::__private::Value::String(::std::string::String::from(#variants))),*
                ]
            }
        }
    }
}
