//! Metadata IR definitions.
//!
//! [`FieldMetadata`] is the record the rule parser writes into: everything
//! a member declares about itself besides its name and type.

use std::collections::BTreeMap;

/// Declared metadata of one struct member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMetadata {
    /// Description from doc comments or attributes
    pub description: Option<String>,

    /// Whether the member is mandatory
    pub required: bool,

    /// Validation rule name to argument
    pub validation: BTreeMap<String, String>,

    /// Permitted literal values
    pub enum_values: Vec<String>,

    /// Default literal
    pub default: Option<String>,

    /// Example literal
    pub example: Option<String>,
}

impl FieldMetadata {
    /// Set or replace a validation rule.
    pub fn set_rule(&mut self, name: impl Into<String>, argument: impl Into<String>) {
        self.validation.insert(name.into(), argument.into());
    }

    /// Whether nothing has been declared (test-only helper).
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_declares_nothing() {
        let metadata = FieldMetadata::default();
        assert_eq!(metadata.description, None);
        assert!(!metadata.required);
        assert!(metadata.validation.is_empty());
        assert!(metadata.enum_values.is_empty());
    }

    #[test]
    fn test_set_rule_replaces() {
        let mut metadata = FieldMetadata::default();
        metadata.set_rule("max", "5");
        metadata.set_rule("max", "10");
        assert_eq!(metadata.validation.len(), 1);
        assert_eq!(metadata.validation["max"], "10");
    }
}
