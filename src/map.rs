//! Ordered field map for entities.
//!
//! [`FieldMap`] wraps an [`IndexMap`] so that field insertion order is exactly the
//! order fields are written inside an entity's block. Re-inserting a field keeps
//! its original slot and replaces only the value.
//!
//! ## Examples
//!
//! ```rust
//! use moose_input::{FieldMap, Quote, Value};
//!
//! let mut fields = FieldMap::new();
//! fields.insert("order", "FIRST");
//! fields.insert("family", "LAGRANGE");
//! fields.insert_quoted("block", "hs:copper", Quote::Double);
//!
//! let keys: Vec<_> = fields.keys().cloned().collect();
//! assert_eq!(keys, vec!["order", "family", "block"]);
//! assert_eq!(fields.get("order").and_then(|v| v.as_str()), Some("FIRST"));
//! ```

use crate::value::{Field, Quote, Value};
use indexmap::IndexMap;

/// An insertion-ordered map of field names to [`Field`]s.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldMap(IndexMap<String, Field>);

impl FieldMap {
    #[must_use]
    pub fn new() -> Self {
        FieldMap(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        FieldMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a value with the default [`Quote::Auto`] rule.
    ///
    /// If the field already existed, its previous value is returned and the field
    /// keeps its position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use moose_input::FieldMap;
    ///
    /// let mut fields = FieldMap::new();
    /// assert!(fields.insert("value", 1).is_none());
    /// assert!(fields.insert("value", 2).is_some());
    /// assert_eq!(fields.len(), 1);
    /// ```
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Field> {
        self.insert_field(key, Field::new(value.into(), Quote::Auto))
    }

    /// Inserts a value with an explicit quoting rule.
    pub fn insert_quoted(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
        quote: Quote,
    ) -> Option<Field> {
        self.insert_field(key, Field::new(value.into(), quote))
    }

    pub fn insert_field(&mut self, key: impl Into<String>, field: Field) -> Option<Field> {
        self.0.insert(key.into(), field)
    }

    /// Returns the value of a field, or `None` when the field is absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).map(|f| &f.value)
    }

    #[must_use]
    pub fn get_field(&self, key: &str) -> Option<&Field> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes a field, preserving the order of the remaining fields.
    pub fn remove(&mut self, key: &str) -> Option<Field> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Field> {
        self.0.keys()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Field> {
        self.0.iter()
    }
}

impl IntoIterator for FieldMap {
    type Item = (String, Field);
    type IntoIter = indexmap::map::IntoIter<String, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FieldMap {
    type Item = (&'a String, &'a Field);
    type IntoIter = indexmap::map::Iter<'a, String, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for FieldMap {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        FieldMap(
            iter.into_iter()
                .map(|(k, v)| (k.into(), Field::new(v, Quote::Auto)))
                .collect(),
        )
    }
}
