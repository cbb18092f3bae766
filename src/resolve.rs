//! Name resolution for references.
//!
//! Rendering a [`Reference`](crate::Reference) never needs the referenced entity's
//! content, only whether an entity of that name exists. [`Resolver`] captures that
//! single question; [`Namespace`] is the resolver a [`Document`](crate::Document)
//! builds from every entity it contains.

use indexmap::IndexSet;
use std::collections::{BTreeSet, HashSet};
use std::hash::BuildHasher;

/// Answers whether an entity name exists at render time.
///
/// Implemented for the usual string sets and for closures.
///
/// # Examples
///
/// ```rust
/// use moose_input::Resolver;
///
/// let only_pipes = |name: &str| name.starts_with("pipe");
/// assert!(only_pipes.resolves("pipe1"));
/// assert!(!only_pipes.resolves("outlet"));
/// ```
pub trait Resolver {
    fn resolves(&self, name: &str) -> bool;
}

impl<S: BuildHasher> Resolver for HashSet<String, S> {
    fn resolves(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl Resolver for BTreeSet<String> {
    fn resolves(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl<F> Resolver for F
where
    F: Fn(&str) -> bool,
{
    fn resolves(&self, name: &str) -> bool {
        self(name)
    }
}

/// The set of entity names visible to references in one document.
///
/// Names are kept in first-seen order. The same name may legitimately appear in
/// two different collections (a variable and an aux variable, say); the namespace
/// only records that the name exists.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Namespace(IndexSet<String>);

impl Namespace {
    #[must_use]
    pub fn new() -> Self {
        Namespace(IndexSet::new())
    }

    /// Records a name. Returns `false` if it was already present.
    pub fn insert(&mut self, name: &str) -> bool {
        self.0.insert(name.to_string())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates names in the order they were first recorded.
    pub fn iter(&self) -> indexmap::set::Iter<'_, String> {
        self.0.iter()
    }
}

impl Resolver for Namespace {
    fn resolves(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl<'a> FromIterator<&'a str> for Namespace {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        Namespace(iter.into_iter().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_keeps_first_seen_order() {
        let mut ns = Namespace::new();
        assert!(ns.insert("disp_y"));
        assert!(ns.insert("disp_x"));
        assert!(!ns.insert("disp_y"));

        let names: Vec<_> = ns.iter().cloned().collect();
        assert_eq!(names, vec!["disp_y", "disp_x"]);
        assert_eq!(ns.len(), 2);
    }

    #[test]
    fn test_set_resolvers() {
        let hashed: HashSet<String> = ["a".to_string()].into_iter().collect();
        assert!(hashed.resolves("a"));
        assert!(!hashed.resolves("b"));

        let ordered: BTreeSet<String> = ["b".to_string()].into_iter().collect();
        assert!(ordered.resolves("b"));

        let ns: Namespace = ["a", "b"].into_iter().collect();
        assert!(ns.resolves("b"));
        assert!(!ns.resolves("c"));
    }
}
