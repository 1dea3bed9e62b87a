//! Integration tests for the ApiSchema derive macro.
//!
//! These tests verify that derived implementations produce the expected
//! field trees when driven by the runtime walker.

use std::collections::HashMap;

use apiduck::{derive, fields_of, ApiSchema, Field, Kind};
use serde_json::{json, Value};

// =============================================================================
// Shared fixtures
// =============================================================================

#[derive(ApiSchema, Default, Clone)]
pub struct CreateUser {
    #[apiduck(validate = "required,min=2,max=100")]
    pub name: String,
    pub age: i64,
    pub tags: Vec<String>,
}

#[derive(ApiSchema, Default)]
pub struct Profile {
    /// Short biography
    #[apiduck(validate = "max=500")]
    pub bio: String,
    pub website: Option<String>,
}

#[derive(ApiSchema, Default)]
pub struct Tag {
    #[apiduck(validate = "required")]
    pub label: String,
}

#[derive(ApiSchema, Default)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub profile: Profile,
    pub avatar: Option<Box<Profile>>,
    pub tags: Vec<Tag>,
    pub maybe_tags: Option<Vec<Tag>>,
    pub pinned: Vec<Option<Tag>>,
}

fn names(fields: &[Field]) -> Vec<&str> {
    fields.iter().map(|f| f.name.as_str()).collect()
}

// =============================================================================
// Basic Struct Tests
// =============================================================================

#[test]
fn test_three_field_scenario() {
    let fields = fields_of::<CreateUser>();
    assert_eq!(fields.len(), 3);

    assert_eq!(fields[0].name, "name");
    assert_eq!(fields[0].type_name, "string");
    assert!(fields[0].required);
    assert_eq!(fields[0].validation.len(), 2);
    assert_eq!(fields[0].validation["min"], "2");
    assert_eq!(fields[0].validation["max"], "100");

    assert_eq!(fields[1].name, "age");
    assert_eq!(fields[1].type_name, "i64");
    assert!(!fields[1].required);
    assert!(fields[1].validation.is_empty());

    assert_eq!(fields[2].name, "tags");
    assert_eq!(fields[2].type_name, "[]string");
    assert!(fields[2].fields.is_empty());
}

#[test]
fn test_single_private_member_yields_nothing() {
    #[derive(ApiSchema)]
    #[allow(dead_code)]
    pub struct Secret {
        token: String,
    }

    assert!(fields_of::<Secret>().is_empty());
}

#[test]
fn test_unit_and_tuple_structs_yield_nothing() {
    #[derive(ApiSchema)]
    pub struct Marker;

    #[derive(ApiSchema)]
    pub struct Id(pub u64);

    assert!(fields_of::<Marker>().is_empty());
    assert!(fields_of::<Id>().is_empty());
    assert_eq!(Marker::kind(), Kind::Aggregate);
}

#[test]
fn test_type_label_is_short_name() {
    assert_eq!(User::type_label(), "User");
    assert_eq!(Vec::<User>::type_label(), "[]User");
    assert_eq!(Option::<User>::type_label(), "User");
}

#[test]
fn test_renamed_type_label() {
    #[derive(ApiSchema)]
    #[apiduck(rename = "UserDTO")]
    pub struct User {
        pub id: u64,
    }

    #[derive(ApiSchema)]
    pub struct Envelope {
        pub user: User,
    }

    assert_eq!(User::type_label(), "UserDTO");
    assert_eq!(fields_of::<Envelope>()[0].type_name, "UserDTO");
}

#[test]
fn test_generic_type_label_and_fields() {
    #[derive(ApiSchema)]
    pub struct Page<T> {
        pub items: Vec<T>,
        pub total: u32,
    }

    assert_eq!(Page::<Tag>::type_label(), "Page<Tag>");
    assert_eq!(Page::<String>::type_label(), "Page<string>");
    assert_eq!(Page::<Box<Tag>>::type_label(), "Page<Tag>");
    assert_eq!(Page::<Vec<Tag>>::type_label(), "Page<[]Tag>");

    let fields = fields_of::<Page<Tag>>();
    assert_eq!(fields[0].type_name, "[]Tag");
    assert_eq!(fields[0].fields, fields_of::<Tag>());
    assert_eq!(fields[1].type_name, "u32");
}

#[test]
fn test_borrowed_members() {
    #[derive(ApiSchema)]
    pub struct Borrowed<'a> {
        pub name: &'a str,
        pub parts: &'a [u8],
    }

    let fields = fields_of::<Borrowed<'static>>();
    assert_eq!(fields[0].type_name, "string");
    assert_eq!(fields[1].type_name, "[]u8");
}

// =============================================================================
// Walker Rule Tests
// =============================================================================

#[test]
fn test_non_aggregate_roots_yield_nothing() {
    assert!(derive(&"text").is_empty());
    assert!(derive(&vec![CreateUser::default()]).is_empty());
    assert!(derive(&HashMap::<String, User>::new()).is_empty());
}

#[test]
fn test_optional_root_resolves_one_level() {
    let none: Option<CreateUser> = None;
    assert_eq!(derive(&none), fields_of::<CreateUser>());
    assert_eq!(derive(&Box::new(CreateUser::default())), fields_of::<CreateUser>());
}

#[test]
fn test_nesting_round_trip() {
    let fields = fields_of::<User>();
    let profile = &fields[2];
    assert_eq!(profile.name, "profile");
    assert_eq!(profile.type_name, "Profile");
    assert_eq!(profile.fields, fields_of::<Profile>());
    assert_eq!(
        profile.child("bio").and_then(|f| f.description.as_deref()),
        Some("Short biography")
    );
}

#[test]
fn test_optional_pointer_member_uses_static_type() {
    let user = User::default();
    assert!(user.avatar.is_none());

    let fields = derive(&user);
    let avatar = &fields[3];
    assert_eq!(avatar.type_name, "Profile");
    assert_eq!(avatar.fields, fields_of::<Profile>());
}

#[test]
fn test_sequence_rewrite() {
    let fields = fields_of::<User>();

    let tags = &fields[4];
    assert_eq!(tags.type_name, "[]Tag");
    assert!(!tags.fields.is_empty());
    assert_eq!(tags.fields, fields_of::<Tag>());

    let maybe_tags = &fields[5];
    assert_eq!(maybe_tags.type_name, "[]Tag");
    assert_eq!(maybe_tags.fields, fields_of::<Tag>());

    let pinned = &fields[6];
    assert_eq!(pinned.type_name, "[]Tag");
    assert_eq!(pinned.fields, fields_of::<Tag>());
}

#[test]
fn test_scalar_members_have_no_children() {
    #[derive(ApiSchema)]
    pub struct Scalars {
        pub flag: bool,
        pub ratio: f64,
        pub letter: char,
        pub labels: HashMap<String, i32>,
        pub extra: Value,
        pub nothing: (),
    }

    let fields = fields_of::<Scalars>();
    let labels: Vec<_> = fields.iter().map(|f| f.type_name.as_str()).collect();
    assert_eq!(labels, ["bool", "f64", "char", "map<string, i32>", "any", "null"]);
    assert!(fields.iter().all(|f| f.fields.is_empty()));
}

#[test]
fn test_chrono_members() {
    #[derive(ApiSchema)]
    pub struct Audit {
        pub created_at: chrono::DateTime<chrono::Utc>,
        pub day: chrono::NaiveDate,
    }

    let fields = fields_of::<Audit>();
    assert_eq!(fields[0].type_name, "DateTime");
    assert_eq!(fields[1].type_name, "NaiveDate");
}

// =============================================================================
// Ordering and Exclusion Tests
// =============================================================================

#[test]
fn test_order_preservation_with_exclusions() {
    #[derive(ApiSchema)]
    #[allow(dead_code)]
    pub struct Mixed {
        pub first: u8,
        #[apiduck(skip)]
        pub skipped: u8,
        hidden: u8,
        pub second: u8,
        #[apiduck(rename = "")]
        pub unnamed: u8,
        pub third: u8,
    }

    assert_eq!(names(&fields_of::<Mixed>()), ["first", "second", "third"]);
}

#[test]
fn test_rename_rules() {
    #[derive(ApiSchema)]
    #[apiduck(rename_all = "camelCase")]
    pub struct Account {
        pub user_id: u64,
        #[apiduck(rename = "mail")]
        pub email_address: String,
        pub created_at: String,
    }

    assert_eq!(names(&fields_of::<Account>()), ["userId", "mail", "createdAt"]);
}

#[test]
fn test_raw_identifier_member() {
    #[derive(ApiSchema)]
    pub struct Token {
        pub r#type: String,
    }

    assert_eq!(names(&fields_of::<Token>()), ["type"]);
}

// =============================================================================
// Metadata Tests
// =============================================================================

#[test]
fn test_required_flag() {
    #[derive(ApiSchema)]
    pub struct Form {
        #[apiduck(validate = "required")]
        pub a: String,
        #[apiduck(validate = "min=1")]
        pub b: String,
        #[apiduck(required)]
        pub c: String,
        pub d: String,
    }

    let required: Vec<bool> = fields_of::<Form>().iter().map(|f| f.required).collect();
    assert_eq!(required, [true, false, true, false]);
}

#[test]
fn test_validation_string_rules() {
    #[derive(ApiSchema)]
    pub struct Signup {
        #[apiduck(validate = "required,email,pattern=^a=b$")]
        pub email: String,
        #[apiduck(validate = "oneof=admin user guest")]
        pub role: String,
    }

    let fields = fields_of::<Signup>();
    assert_eq!(fields[0].validation["email"], "true");
    assert_eq!(fields[0].validation["pattern"], "^a=b$");
    assert!(!fields[0].validation.contains_key("required"));

    assert_eq!(fields[1].enum_values, vec![json!("admin"), json!("user"), json!("guest")]);
    assert!(fields[1].validation.is_empty());
}

#[test]
fn test_documentation_metadata_and_coercion() {
    #[derive(ApiSchema)]
    pub struct Settings {
        #[apiduck(meta = "desc=Receive the newsletter,default=true,example=false")]
        pub newsletter: bool,
        #[apiduck(meta = "desc=Page size,default=20,example=50,unit=items")]
        pub page_size: u32,
    }

    let fields = fields_of::<Settings>();
    assert_eq!(fields[0].description.as_deref(), Some("Receive the newsletter"));
    assert_eq!(fields[0].default, Some(json!(true)));
    assert_eq!(fields[0].example, Some(json!(false)));

    assert_eq!(fields[1].default, Some(json!("20")));
    assert_eq!(fields[1].example, Some(json!("50")));
    assert!(fields[1].validation.is_empty());
}

#[test]
fn test_typed_attributes_override_strings() {
    #[derive(ApiSchema)]
    pub struct Query {
        /// From the doc comment
        #[apiduck(
            validate = "min=1,max=10",
            meta = "desc=From meta,example=3",
            desc = "From the attribute",
            max = 25,
            example = "7"
        )]
        pub limit: u32,
    }

    let field = &fields_of::<Query>()[0];
    assert_eq!(field.description.as_deref(), Some("From the attribute"));
    assert_eq!(field.validation["min"], "1");
    assert_eq!(field.validation["max"], "25");
    assert_eq!(field.example, Some(json!("7")));
}

#[test]
fn test_negative_typed_bounds() {
    #[derive(ApiSchema)]
    pub struct Reading {
        #[apiduck(min = -40, max = 125)]
        pub celsius: i32,
        #[apiduck(validate = "min=-40")]
        pub fahrenheit: i32,
    }

    let fields = fields_of::<Reading>();
    assert_eq!(fields[0].validation["min"], "-40");
    assert_eq!(fields[0].validation["max"], "125");
    assert_eq!(fields[0].validation["min"], fields[1].validation["min"]);
}

#[test]
fn test_doc_comment_description() {
    let fields = fields_of::<Profile>();
    assert_eq!(fields[0].description.as_deref(), Some("Short biography"));
    assert_eq!(fields[1].description, None);
}

// =============================================================================
// Enum Tests
// =============================================================================

#[derive(ApiSchema)]
#[apiduck(rename_all = "lowercase")]
pub enum Status {
    Active,
    Suspended,
    #[apiduck(rename = "gone")]
    Deleted,
}

#[test]
fn test_unit_enum_values() {
    assert_eq!(Status::kind(), Kind::Enumeration);
    assert_eq!(Status::type_label(), "Status");
    assert_eq!(
        Status::enum_values(),
        vec![json!("active"), json!("suspended"), json!("gone")]
    );
    assert!(fields_of::<Status>().is_empty());
}

#[test]
fn test_enum_member_inherits_values() {
    #[derive(ApiSchema)]
    pub struct Account {
        pub status: Status,
        pub history: Vec<Status>,
        pub previous: Option<Status>,
        #[apiduck(enum("active"))]
        pub restricted: Status,
    }

    let fields = fields_of::<Account>();
    let all = vec![json!("active"), json!("suspended"), json!("gone")];
    assert_eq!(fields[0].type_name, "Status");
    assert_eq!(fields[0].enum_values, all);
    assert_eq!(fields[1].type_name, "[]Status");
    assert_eq!(fields[1].enum_values, all);
    assert_eq!(fields[2].enum_values, all);
    assert_eq!(fields[3].enum_values, vec![json!("active")]);
}

// =============================================================================
// Recursion Tests
// =============================================================================

#[derive(ApiSchema)]
pub struct Node {
    pub children: Vec<Node>,
    pub parent: Option<Box<Node>>,
    pub label: String,
}

#[derive(ApiSchema)]
pub struct Department {
    pub name: String,
    pub employees: Vec<Employee>,
}

#[derive(ApiSchema)]
pub struct Employee {
    pub name: String,
    pub department: Option<Box<Department>>,
}

#[test]
fn test_self_referential_type_is_truncated() {
    let fields = fields_of::<Node>();
    assert_eq!(names(&fields), ["children", "parent", "label"]);

    assert_eq!(fields[0].type_name, "[]Node (recursive)");
    assert!(fields[0].fields.is_empty());
    assert_eq!(fields[1].type_name, "Node (recursive)");
    assert!(fields[1].fields.is_empty());
    assert_eq!(fields[2].type_name, "string");
}

#[test]
fn test_mutually_recursive_types_are_truncated_at_reentry() {
    let fields = fields_of::<Department>();
    let employees = &fields[1];
    assert_eq!(employees.type_name, "[]Employee");

    let department = employees.child("department").unwrap();
    assert_eq!(department.type_name, "Department (recursive)");
    assert!(department.fields.is_empty());

    let from_employee = fields_of::<Employee>();
    let nested = from_employee[1].child("employees").unwrap();
    assert_eq!(nested.type_name, "[]Employee (recursive)");
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_concurrent_walks_agree() {
    let expected = fields_of::<User>();
    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(fields_of::<User>))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// The derived tree depends on the type only, never on the values.
        #[test]
        fn prop_derive_ignores_values(
            name in ".{0,20}",
            age in any::<i64>(),
            tags in proptest::collection::vec(".{0,8}", 0..5)
        ) {
            let sample = CreateUser { name, age, tags };
            prop_assert_eq!(derive(&sample), derive(&CreateUser::default()));
            prop_assert_eq!(derive(&Some(sample.clone())), fields_of::<CreateUser>());
        }
    }
}
