//! Schema walker.
//!
//! The walker drives a depth-first traversal of a type's structure through
//! [`ApiSchema`] dispatch and turns each member declaration into a [`Field`].
//! Every walk owns a fresh [`Walker`]; nothing is cached or shared between
//! walks, so independent walks may run on any number of threads.
//!
//! Self-referential types are truncated at their first re-entry: the member
//! that would recurse gets the label `"<label> (recursive)"` and no children.

use std::any::type_name;

use crate::field::{Field, FieldDecl};
use crate::traits::{ApiSchema, Kind};

/// Suffix appended to the type label of a member whose expansion was cut.
pub const RECURSIVE_MARKER: &str = " (recursive)";

/// Traversal state of a single walk.
#[derive(Debug, Default)]
pub struct Walker {
    /// Aggregates currently being described, outermost first.
    visiting: Vec<&'static str>,
    /// Set when an aggregate refused to re-enter itself.
    truncated: bool,
}

impl Walker {
    /// Create a walker with an empty traversal stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of aggregates currently being described.
    pub fn depth(&self) -> usize {
        self.visiting.len()
    }

    /// Describe the members of aggregate `T`.
    ///
    /// `build` is called with the walker while `T` is marked as in progress.
    /// If `T` is already in progress further up the stack, `build` is not
    /// called and no fields are returned.
    pub fn aggregate<T, F>(&mut self, build: F) -> Vec<Field>
    where
        T: ?Sized,
        F: FnOnce(&mut Walker) -> Vec<Field>,
    {
        let id = type_name::<T>();
        if self.visiting.contains(&id) {
            tracing::debug!(type_name = id, depth = self.depth(), "recursive type, truncating");
            self.truncated = true;
            return Vec::new();
        }

        tracing::trace!(type_name = id, depth = self.depth(), "describing aggregate");
        self.visiting.push(id);
        let fields = build(self);
        self.visiting.pop();
        fields
    }

    /// Turn one member declaration of type `F` into a field.
    ///
    /// The field gets `F`'s type label, `F`'s enumeration values unless the
    /// declaration names its own, and `F`'s children.
    pub fn member<F: ApiSchema + ?Sized>(&mut self, decl: FieldDecl) -> Field {
        let declares_enum = !decl.enum_values.is_empty();
        let mut field = decl.into_field(F::type_label());
        if !declares_enum {
            field.enum_values = F::enum_values();
        }

        self.truncated = false;
        field.fields = F::describe(self);
        if std::mem::take(&mut self.truncated) {
            field.type_name.push_str(RECURSIVE_MARKER);
        }

        field
    }
}

/// Derive the field tree of a sample value.
///
/// Only the value's type is inspected; its data never influences the result.
/// Returns an empty sequence if the type, after resolving one level of
/// optional indirection, is not an aggregate.
///
/// # Example
///
/// ```rust
/// assert!(apiduck::derive(&42_i32).is_empty());
/// assert!(apiduck::derive(&vec!["a", "b"]).is_empty());
/// ```
pub fn derive<T: ApiSchema + ?Sized>(sample: &T) -> Vec<Field> {
    let _ = sample;
    fields_of::<T>()
}

/// Derive the field tree of type `T`.
pub fn fields_of<T: ApiSchema + ?Sized>() -> Vec<Field> {
    match T::resolved_kind() {
        Kind::Aggregate => T::describe(&mut Walker::new()),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Profile;

    impl ApiSchema for Profile {
        fn type_label() -> String {
            "Profile".to_string()
        }

        fn kind() -> Kind {
            Kind::Aggregate
        }

        fn describe(walker: &mut Walker) -> Vec<Field> {
            walker.aggregate::<Self, _>(|walker| {
                vec![walker.member::<String>(FieldDecl::new("bio").rule("max", "500"))]
            })
        }
    }

    /// `struct Node { children: Vec<Node>, parent: Option<Box<Node>>, label: String }`
    struct Node;

    impl ApiSchema for Node {
        fn type_label() -> String {
            "Node".to_string()
        }

        fn kind() -> Kind {
            Kind::Aggregate
        }

        fn describe(walker: &mut Walker) -> Vec<Field> {
            walker.aggregate::<Self, _>(|walker| {
                vec![
                    walker.member::<Vec<Node>>(FieldDecl::new("children")),
                    walker.member::<Option<Box<Node>>>(FieldDecl::new("parent")),
                    walker.member::<String>(FieldDecl::new("label")),
                ]
            })
        }
    }

    #[test]
    fn test_non_aggregate_roots_yield_nothing() {
        assert!(derive(&1_u8).is_empty());
        assert!(derive("text").is_empty());
        assert!(fields_of::<Vec<Profile>>().is_empty());
        assert!(fields_of::<Option<Option<Profile>>>().is_empty());
    }

    #[test]
    fn test_optional_root_resolves_one_level() {
        let sample: Option<Profile> = None;
        let fields = derive(&sample);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name, "bio");
    }

    #[test]
    fn test_member_of_optional_aggregate_has_children() {
        let mut walker = Walker::new();
        let field = walker.member::<Option<Profile>>(FieldDecl::new("profile"));
        assert_eq!(field.type_name, "Profile");
        assert_eq!(field.fields, fields_of::<Profile>());
    }

    #[test]
    fn test_member_of_sequence_rewrites_label() {
        let mut walker = Walker::new();
        let field = walker.member::<Vec<Profile>>(FieldDecl::new("profiles"));
        assert_eq!(field.type_name, "[]Profile");
        assert_eq!(field.fields, fields_of::<Profile>());

        let tags = walker.member::<Vec<String>>(FieldDecl::new("tags"));
        assert_eq!(tags.type_name, "[]string");
        assert!(tags.fields.is_empty());
    }

    #[test]
    fn test_recursive_type_is_truncated() {
        let fields = fields_of::<Node>();
        assert_eq!(fields.len(), 3);

        assert_eq!(fields[0].name, "children");
        assert_eq!(fields[0].type_name, "[]Node (recursive)");
        assert!(fields[0].fields.is_empty());

        assert_eq!(fields[1].name, "parent");
        assert_eq!(fields[1].type_name, "Node (recursive)");
        assert!(fields[1].fields.is_empty());

        assert_eq!(fields[2].type_name, "string");
    }

    #[test]
    fn test_walker_stack_is_balanced() {
        let mut walker = Walker::new();
        let _ = Node::describe(&mut walker);
        assert_eq!(walker.depth(), 0);
    }

    #[test]
    fn test_walks_are_independent_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(fields_of::<Node>))
            .collect();
        let expected = fields_of::<Node>();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}
