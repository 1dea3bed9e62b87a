//! Field tree data model.
//!
//! A [`Field`] is one node of a derived documentation schema. Field trees are
//! produced by the walker and embedded unchanged into endpoint bodies,
//! responses and form fields.
//!
//! A [`FieldDecl`] is the declaration side of a field: the name and the
//! metadata attached to one struct member. The derive macro emits one
//! `FieldDecl` per member; the walker turns it into a `Field` once the member's
//! type has been inspected.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A node in the derived schema tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Externally visible field name.
    pub name: String,

    /// Short type label (e.g. `string`, `i64`, `User`, `[]Tag`).
    #[serde(rename = "type")]
    pub type_name: String,

    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether validation metadata marks the member mandatory.
    #[serde(default)]
    pub required: bool,

    /// Validation rule name to rule argument.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub validation: BTreeMap<String, String>,

    /// Permitted literal values, in declaration order.
    #[serde(default, rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,

    /// Literal default value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Literal example value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,

    /// Child fields of an aggregate or sequence-of-aggregate member.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
}

impl Field {
    /// Create a field with a name and type label.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            ..Default::default()
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the required flag.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Add a validation rule.
    pub fn with_rule(mut self, name: impl Into<String>, argument: impl Into<String>) -> Self {
        self.validation.insert(name.into(), argument.into());
        self
    }

    /// Set the permitted values.
    pub fn with_enum(mut self, values: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        self.enum_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Set the default value.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Set the example value.
    pub fn with_example(mut self, value: impl Into<Value>) -> Self {
        self.example = Some(value.into());
        self
    }

    /// Set the child fields.
    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }

    /// Whether this field has child fields.
    pub fn has_children(&self) -> bool {
        !self.fields.is_empty()
    }

    /// Look up a direct child by name.
    pub fn child(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Declared metadata of one struct member.
///
/// Built by generated code (or by hand in a manual [`ApiSchema`]
/// implementation) and consumed by [`Walker::member`].
///
/// [`ApiSchema`]: crate::ApiSchema
/// [`Walker::member`]: crate::Walker::member
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldDecl {
    /// Externally visible name.
    pub name: String,
    /// Description from metadata or doc comments.
    pub description: Option<String>,
    /// Required flag.
    pub required: bool,
    /// Validation rules.
    pub validation: BTreeMap<String, String>,
    /// Declared enumeration; empty defers to the member type's own values.
    pub enum_values: Vec<String>,
    /// Raw default literal.
    pub default: Option<String>,
    /// Raw example literal.
    pub example: Option<String>,
}

impl FieldDecl {
    /// Declare a member with its visible name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark the member as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Add a validation rule; a later rule with the same name replaces it.
    pub fn rule(mut self, name: impl Into<String>, argument: impl Into<String>) -> Self {
        self.validation.insert(name.into(), argument.into());
        self
    }

    /// Append a permitted value.
    pub fn enum_value(mut self, value: impl Into<String>) -> Self {
        self.enum_values.push(value.into());
        self
    }

    /// Set the raw default literal.
    pub fn default_literal(mut self, literal: impl Into<String>) -> Self {
        self.default = Some(literal.into());
        self
    }

    /// Set the raw example literal.
    pub fn example_literal(mut self, literal: impl Into<String>) -> Self {
        self.example = Some(literal.into());
        self
    }

    /// Turn the declaration into a field of the given type label.
    ///
    /// Literals are coerced against the label: a `bool` member reads `"true"`
    /// as `true` and anything else as `false`; every other literal stays a
    /// string.
    pub fn into_field(self, type_name: impl Into<String>) -> Field {
        let type_name = type_name.into();
        let default = self.default.map(|raw| coerce_literal(&raw, &type_name));
        let example = self.example.map(|raw| coerce_literal(&raw, &type_name));

        Field {
            name: self.name,
            description: self.description,
            required: self.required,
            validation: self.validation,
            enum_values: self.enum_values.into_iter().map(Value::String).collect(),
            default,
            example,
            fields: Vec::new(),
            type_name,
        }
    }
}

/// Interpret a declared literal for a member of the given type label.
pub fn coerce_literal(raw: &str, type_name: &str) -> Value {
    match type_name {
        "bool" => Value::Bool(raw == "true"),
        _ => Value::String(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_serialization_omits_absent_attributes() {
        let field = Field::new("age", "i32");
        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(value, json!({ "name": "age", "type": "i32", "required": false }));
    }

    #[test]
    fn test_field_serialization_full() {
        let field = Field::new("role", "string")
            .with_description("User role")
            .with_required(true)
            .with_rule("max", "10")
            .with_enum(["admin", "user"])
            .with_default("user")
            .with_example("admin");
        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "role",
                "type": "string",
                "description": "User role",
                "required": true,
                "validation": { "max": "10" },
                "enum": ["admin", "user"],
                "default": "user",
                "example": "admin"
            })
        );
    }

    #[test]
    fn test_field_round_trips_through_json() {
        let field = Field::new("profile", "Profile")
            .with_fields(vec![Field::new("bio", "string").with_rule("max", "500")]);
        let text = serde_json::to_string(&field).unwrap();
        let back: Field = serde_json::from_str(&text).unwrap();
        assert_eq!(back, field);
    }

    #[test]
    fn test_decl_into_field_coerces_bool_literals() {
        let field = FieldDecl::new("active")
            .default_literal("true")
            .example_literal("yes")
            .into_field("bool");
        assert_eq!(field.default, Some(Value::Bool(true)));
        assert_eq!(field.example, Some(Value::Bool(false)));
    }

    #[test]
    fn test_decl_into_field_keeps_numeric_literals_as_strings() {
        let field = FieldDecl::new("age")
            .example_literal("25")
            .into_field("i32");
        assert_eq!(field.example, Some(Value::String("25".to_string())));
    }

    #[test]
    fn test_decl_rule_last_write_wins() {
        let decl = FieldDecl::new("name").rule("min", "1").rule("min", "2");
        assert_eq!(decl.validation.get("min").map(String::as_str), Some("2"));
    }

    #[test]
    fn test_child_lookup() {
        let field = Field::new("user", "User").with_fields(vec![
            Field::new("id", "u64"),
            Field::new("name", "string"),
        ]);
        assert!(field.has_children());
        assert_eq!(field.child("name").map(|f| f.type_name.as_str()), Some("string"));
        assert!(field.child("missing").is_none());
    }
}
