//! Core trait for schema derivation.
//!
//! This module defines the [`ApiSchema`] trait, the capability the walker uses
//! to inspect a type: its short label, its structural [`Kind`], its members
//! and its permitted values.
//!
//! ## Deriving vs Manual Implementation
//!
//! Most users will derive this trait using `#[derive(ApiSchema)]`:
//!
//! ```rust,ignore
//! use apiduck::ApiSchema;
//!
//! #[derive(ApiSchema)]
//! pub struct User {
//!     #[apiduck(validate = "required,min=2,max=100")]
//!     pub name: String,
//!     pub age: u32,
//! }
//! ```
//!
//! A manual implementation describes its members through the [`Walker`]:
//!
//! ```rust
//! use apiduck::{ApiSchema, Field, FieldDecl, Kind, Walker};
//!
//! struct Point {
//!     x: f64,
//!     y: f64,
//! }
//!
//! impl ApiSchema for Point {
//!     fn type_label() -> String {
//!         "Point".to_string()
//!     }
//!
//!     fn kind() -> Kind {
//!         Kind::Aggregate
//!     }
//!
//!     fn describe(walker: &mut Walker) -> Vec<Field> {
//!         walker.aggregate::<Self, _>(|walker| {
//!             vec![
//!                 walker.member::<f64>(FieldDecl::new("x").required()),
//!                 walker.member::<f64>(FieldDecl::new("y").required()),
//!             ]
//!         })
//!     }
//! }
//!
//! let fields = apiduck::fields_of::<Point>();
//! assert_eq!(fields.len(), 2);
//! assert_eq!(fields[0].type_name, "f64");
//! ```
//!
//! ## Blanket Implementations
//!
//! - **Scalars**: `String`, `str`, `Cow<str>`, `bool`, `char`, integers, floats,
//!   `serde_json::Value`, `()`, chrono date and time types
//! - **Transparent pointers**: `&T`, `&mut T`, `Box<T>`, `Rc<T>`, `Arc<T>`
//! - **Optional reference**: `Option<T>`
//! - **Sequences**: `Vec<T>`, `VecDeque<T>`, `[T]`, `[T; N]`, `HashSet<T>`, `BTreeSet<T>`
//! - **Maps**: `HashMap<K, V>`, `BTreeMap<K, V>`
//! - **Feature-gated**: `Uuid` (uuid feature)

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use serde_json::Value;

use crate::field::Field;
use crate::walker::Walker;

/// Structural kind of a type, as seen by the walker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Leaf value without members.
    Scalar,
    /// Record with named members.
    Aggregate,
    /// Closed set of literal values.
    Enumeration,
    /// Nullable reference to another type.
    Optional,
    /// Ordered repetition of elements.
    Sequence,
    /// Key to value mapping.
    Map,
}

/// Trait for types whose shape can be documented.
///
/// # Required Methods
///
/// - [`type_label`](ApiSchema::type_label) - Returns the short type label
///
/// # Provided Methods
///
/// - [`kind`](ApiSchema::kind) - Structural kind (defaults to [`Kind::Scalar`])
/// - [`resolved_kind`](ApiSchema::resolved_kind) - Kind behind one level of optional indirection
/// - [`describe`](ApiSchema::describe) - Child fields (defaults to none)
/// - [`enum_values`](ApiSchema::enum_values) - Permitted values (defaults to none)
pub trait ApiSchema {
    /// Returns the short type label shown in documentation.
    ///
    /// # Example
    ///
    /// ```rust
    /// use apiduck::ApiSchema;
    ///
    /// assert_eq!(String::type_label(), "string");
    /// assert_eq!(Vec::<i64>::type_label(), "[]i64");
    /// assert_eq!(Option::<bool>::type_label(), "bool");
    /// ```
    fn type_label() -> String;

    /// Returns the structural kind of this type.
    fn kind() -> Kind {
        Kind::Scalar
    }

    /// Returns the kind after resolving exactly one level of optional
    /// indirection. Equal to [`kind`](ApiSchema::kind) for everything except
    /// `Option<T>`.
    fn resolved_kind() -> Kind {
        Self::kind()
    }

    /// Returns the child fields of this type.
    ///
    /// Aggregates describe their members; optional references and sequences
    /// describe their aggregate target; everything else has no children.
    fn describe(walker: &mut Walker) -> Vec<Field> {
        let _ = walker;
        Vec::new()
    }

    /// Returns the permitted literal values of an enumeration.
    fn enum_values() -> Vec<Value> {
        Vec::new()
    }
}

// =============================================================================
// Scalars
// =============================================================================

macro_rules! impl_api_schema_for_scalar {
    ($($ty:ty => $label:literal),* $(,)?) => {
        $(
            impl ApiSchema for $ty {
                fn type_label() -> String {
                    $label.to_string()
                }
            }
        )*
    };
}

impl_api_schema_for_scalar!(
    String => "string",
    str => "string",
    bool => "bool",
    char => "char",
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    i128 => "i128",
    isize => "isize",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    u128 => "u128",
    usize => "usize",
    f32 => "f32",
    f64 => "f64",
    () => "null",
    Value => "any",
    chrono::NaiveDate => "NaiveDate",
    chrono::NaiveTime => "NaiveTime",
    chrono::NaiveDateTime => "NaiveDateTime",
);

impl<Tz: chrono::TimeZone> ApiSchema for chrono::DateTime<Tz> {
    fn type_label() -> String {
        "DateTime".to_string()
    }
}

#[cfg(feature = "uuid")]
impl ApiSchema for uuid::Uuid {
    fn type_label() -> String {
        "Uuid".to_string()
    }
}

// =============================================================================
// Transparent pointers
// =============================================================================

macro_rules! impl_api_schema_for_pointer {
    ($($ptr:ty),* $(,)?) => {
        $(
            impl<T: ApiSchema + ?Sized> ApiSchema for $ptr {
                fn type_label() -> String {
                    T::type_label()
                }

                fn kind() -> Kind {
                    T::kind()
                }

                fn resolved_kind() -> Kind {
                    T::resolved_kind()
                }

                fn describe(walker: &mut Walker) -> Vec<Field> {
                    T::describe(walker)
                }

                fn enum_values() -> Vec<Value> {
                    T::enum_values()
                }
            }
        )*
    };
}

impl_api_schema_for_pointer!(&T, &mut T, Box<T>, Rc<T>, Arc<T>);

impl<T: ApiSchema + ToOwned + ?Sized> ApiSchema for Cow<'_, T> {
    fn type_label() -> String {
        T::type_label()
    }

    fn kind() -> Kind {
        T::kind()
    }

    fn resolved_kind() -> Kind {
        T::resolved_kind()
    }

    fn describe(walker: &mut Walker) -> Vec<Field> {
        T::describe(walker)
    }

    fn enum_values() -> Vec<Value> {
        T::enum_values()
    }
}

// =============================================================================
// Optional reference
// =============================================================================

impl<T: ApiSchema> ApiSchema for Option<T> {
    fn type_label() -> String {
        T::type_label()
    }

    fn kind() -> Kind {
        Kind::Optional
    }

    fn resolved_kind() -> Kind {
        T::kind()
    }

    fn describe(walker: &mut Walker) -> Vec<Field> {
        match T::kind() {
            Kind::Aggregate | Kind::Sequence => T::describe(walker),
            _ => Vec::new(),
        }
    }

    fn enum_values() -> Vec<Value> {
        T::enum_values()
    }
}

// =============================================================================
// Sequences
// =============================================================================

fn describe_element<T: ApiSchema + ?Sized>(walker: &mut Walker) -> Vec<Field> {
    match T::resolved_kind() {
        Kind::Aggregate => T::describe(walker),
        _ => Vec::new(),
    }
}

macro_rules! impl_api_schema_for_sequence {
    ($(impl<$($param:ident),*> for $seq:ty),* $(,)?) => {
        $(
            impl<T: ApiSchema, $($param),*> ApiSchema for $seq {
                fn type_label() -> String {
                    format!("[]{}", T::type_label())
                }

                fn kind() -> Kind {
                    Kind::Sequence
                }

                fn describe(walker: &mut Walker) -> Vec<Field> {
                    describe_element::<T>(walker)
                }

                fn enum_values() -> Vec<Value> {
                    T::enum_values()
                }
            }
        )*
    };
}

impl_api_schema_for_sequence!(
    impl<> for Vec<T>,
    impl<> for VecDeque<T>,
    impl<> for BTreeSet<T>,
    impl<S> for HashSet<T, S>,
);

impl<T: ApiSchema> ApiSchema for [T] {
    fn type_label() -> String {
        format!("[]{}", T::type_label())
    }

    fn kind() -> Kind {
        Kind::Sequence
    }

    fn describe(walker: &mut Walker) -> Vec<Field> {
        describe_element::<T>(walker)
    }

    fn enum_values() -> Vec<Value> {
        T::enum_values()
    }
}

impl<T: ApiSchema, const N: usize> ApiSchema for [T; N] {
    fn type_label() -> String {
        <[T]>::type_label()
    }

    fn kind() -> Kind {
        Kind::Sequence
    }

    fn describe(walker: &mut Walker) -> Vec<Field> {
        <[T]>::describe(walker)
    }

    fn enum_values() -> Vec<Value> {
        T::enum_values()
    }
}

// =============================================================================
// Maps
// =============================================================================

impl<K: ApiSchema, V: ApiSchema, S> ApiSchema for HashMap<K, V, S> {
    fn type_label() -> String {
        format!("map<{}, {}>", K::type_label(), V::type_label())
    }

    fn kind() -> Kind {
        Kind::Map
    }
}

impl<K: ApiSchema, V: ApiSchema> ApiSchema for BTreeMap<K, V> {
    fn type_label() -> String {
        format!("map<{}, {}>", K::type_label(), V::type_label())
    }

    fn kind() -> Kind {
        Kind::Map
    }
}

// =============================================================================
// Tests
// =============================================================================
