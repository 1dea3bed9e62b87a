//! Metadata string decoding.
//!
//! Members can carry two declarative strings:
//!
//! - a validation string, `#[apiduck(validate = "required,min=2,oneof=a b")]`:
//!   comma-separated bare tokens or `key=value` pairs;
//! - a documentation string, `#[apiduck(meta = "desc=...,default=...,example=...")]`:
//!   comma-separated `key=value` pairs.
//!
//! Both are decoded once, at expansion time, into a [`FieldMetadata`].
//! Later writes to the same attribute replace earlier ones.

use crate::ir::FieldMetadata;

/// Error type for documentation string decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("malformed metadata pair `{0}`, expected `key=value`")]
    MalformedPair(String),
}

/// Decode a validation string into `metadata`.
///
/// - bare `required` sets the required flag and is not stored as a rule;
/// - other bare tokens are stored with the argument `"true"`;
/// - `oneof` and `enum` replace the permitted values with their
///   space- or comma-separated list and are not stored as rules;
/// - every other `key=value` pair is stored verbatim, split at the first `=`.
pub fn apply_validation(metadata: &mut FieldMetadata, rules: &str) {
    for token in segments(rules) {
        match token.split_once('=') {
            Some((key, value)) => {
                let key = key.trim();
                let value = value.trim();
                match key {
                    "" => {}
                    "oneof" | "enum" => metadata.enum_values = split_list(value),
                    _ => metadata.set_rule(key, value),
                }
            }
            None if token == "required" => metadata.required = true,
            None => metadata.set_rule(token, "true"),
        }
    }
}

/// Decode a documentation string into `metadata`.
///
/// Recognized keys are `desc`, `default` and `example`; other keys are
/// ignored. A segment without `=` is rejected.
pub fn apply_doc_meta(metadata: &mut FieldMetadata, pairs: &str) -> Result<(), RuleError> {
    for segment in segments(pairs) {
        let (key, value) = segment
            .split_once('=')
            .ok_or_else(|| RuleError::MalformedPair(segment.to_string()))?;
        let value = value.trim().to_string();
        match key.trim() {
            "desc" => metadata.description = Some(value),
            "default" => metadata.default = Some(value),
            "example" => metadata.example = Some(value),
            _ => {}
        }
    }
    Ok(())
}

/// Split a list of literals on whitespace and commas.
pub fn split_list(list: &str) -> Vec<String> {
    list.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn segments(input: &str) -> impl Iterator<Item = &str> {
    input.split(',').map(str::trim).filter(|s| !s.is_empty())
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_key() -> impl Strategy<Value = String> {
        "[a-z]{1,8}".prop_filter("reserved key", |k| {
            !matches!(k.as_str(), "required" | "oneof" | "enum")
        })
    }

    fn arb_value() -> impl Strategy<Value = String> {
        "[a-z0-9]{1,8}"
    }

    proptest! {
        /// Distinct keys decode to the same record in any order.
        #[test]
        fn prop_validation_order_independent(
            pairs in proptest::collection::btree_map(arb_key(), arb_value(), 0..6)
        ) {
            let forward: Vec<String> = pairs.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            let mut backward = forward.clone();
            backward.reverse();

            let mut a = FieldMetadata::default();
            apply_validation(&mut a, &forward.join(","));
            let mut b = FieldMetadata::default();
            apply_validation(&mut b, &backward.join(","));

            prop_assert_eq!(&a, &b);
            prop_assert_eq!(a.validation, pairs);
        }

        /// A repeated key keeps its last value.
        #[test]
        fn prop_validation_last_write_wins(key in arb_key(), first in arb_value(), last in arb_value()) {
            let mut metadata = FieldMetadata::default();
            apply_validation(&mut metadata, &format!("{k}={},{k}={}", first, last, k = key));
            prop_assert_eq!(metadata.validation.get(&key), Some(&last));
        }

        /// Decoding is deterministic.
        #[test]
        fn prop_validation_deterministic(input in "[a-z=, ]{0,40}") {
            let mut a = FieldMetadata::default();
            apply_validation(&mut a, &input);
            let mut b = FieldMetadata::default();
            apply_validation(&mut b, &input);
            prop_assert_eq!(a, b);
        }

        /// Documentation strings never store unknown keys anywhere.
        #[test]
        fn prop_doc_meta_unknown_keys_ignored(key in arb_key(), value in arb_value()) {
            prop_assume!(!matches!(key.as_str(), "desc" | "default" | "example"));
            let mut metadata = FieldMetadata::default();
            apply_doc_meta(&mut metadata, &format!("{}={}", key, value)).unwrap();
            prop_assert!(metadata.is_empty());
        }
    }
}
