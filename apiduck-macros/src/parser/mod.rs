//! Parser module for extracting schema information from Rust AST.
//!
//! This module contains parsers for:
//! - Struct definitions
//! - Enum definitions
//! - Attributes
//! - Metadata strings

pub mod attributes;
pub mod enum_parser;
pub mod rules;
pub mod struct_parser;

#[cfg(feature = "serde-compat")]
pub mod serde_compat;
