//! Labelled sections of named blocks.
//!
//! A [`Collection`] renders as an enclosing section around its children:
//!
//! ```text
//! [Variables]
//! [disp_x]
//! order = FIRST
//! []
//! []
//! ```
//!
//! Children are either entities or further collections ([`Node`]), so a section
//! can nest another section: the `[BCs]` → `[Pressure]` → `[side]` shape that
//! pressure boundary conditions require.
//!
//! Names are unique among a collection's direct children. Inserting a taken name
//! is reported as [`Error::DuplicateName`]; by default the first entry wins.

use crate::entity::{check_name, emit_fields, open_line, Entity, CLOSE};
use crate::map::FieldMap;
use crate::options::RenderOptions;
use crate::resolve::{Namespace, Resolver};
use crate::value::Value;
use crate::{Error, Result};
use indexmap::map::Entry;
use indexmap::IndexMap;
use tracing::warn;

/// What [`Collection::insert`] does when a name is already taken.
///
/// Either way the conflict is returned as [`Error::DuplicateName`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Keep the entry that was inserted first and drop the newcomer
    #[default]
    KeepFirst,
    /// Store the newcomer in the original entry's position
    Replace,
}

/// A child of a collection.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Entity(Entity),
    Collection(Collection),
}

impl Node {
    /// The key this node occupies in its parent: an entity's name or a section's label.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Node::Entity(e) => e.name(),
            Node::Collection(c) => c.label(),
        }
    }

    #[must_use]
    pub fn as_entity(&self) -> Option<&Entity> {
        match self {
            Node::Entity(e) => Some(e),
            Node::Collection(_) => None,
        }
    }

    #[must_use]
    pub fn as_collection(&self) -> Option<&Collection> {
        match self {
            Node::Collection(c) => Some(c),
            Node::Entity(_) => None,
        }
    }
}

/// An ordered, name-unique section of entities.
///
/// # Examples
///
/// ```rust
/// use moose_input::{Collection, Entity, FieldMap};
///
/// let mut kernels = Collection::new("Kernels").unwrap();
/// kernels
///     .insert(Entity::new("heat", FieldMap::new()).unwrap().with_field("type", "ADHeatConduction"))
///     .unwrap();
///
/// // same name again: reported, first entry kept
/// let dup = Entity::new("heat", FieldMap::new()).unwrap().with_field("type", "Other");
/// assert!(kernels.insert(dup).is_err());
/// assert_eq!(kernels.len(), 1);
/// assert_eq!(
///     kernels.get("heat").and_then(|e| e.get("type")).and_then(|v| v.as_str()),
///     Some("ADHeatConduction")
/// );
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Collection {
    label: String,
    entries: IndexMap<String, Node>,
    fields: FieldMap,
    policy: DuplicatePolicy,
}

impl Collection {
    /// Creates an empty collection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] when `label` cannot be written as a block
    /// header (see [`check_name`]).
    pub fn new(label: impl Into<String>) -> Result<Self> {
        let label = label.into();
        check_name("collection", &label)?;
        Ok(Collection {
            label,
            entries: IndexMap::new(),
            fields: FieldMap::new(),
            policy: DuplicatePolicy::default(),
        })
    }

    #[must_use]
    pub fn with_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Adds a section-level field, written after the child blocks.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use moose_input::Collection;
    ///
    /// let mesh = Collection::new("Mesh").unwrap().with_field("second_order", true);
    /// assert_eq!(mesh.fields().len(), 1);
    /// ```
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key, value);
        self
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    #[must_use]
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Inserts an entity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateName`] when the name is already present. The
    /// collection is left consistent: with [`DuplicatePolicy::KeepFirst`] the new
    /// entity is dropped, with [`DuplicatePolicy::Replace`] it takes the old slot.
    pub fn insert(&mut self, entity: Entity) -> Result<()> {
        self.insert_node(Node::Entity(entity))
    }

    /// Inserts a nested section, keyed by its label.
    ///
    /// # Errors
    ///
    /// Same conflict rules as [`Collection::insert`].
    pub fn insert_section(&mut self, section: Collection) -> Result<()> {
        self.insert_node(Node::Collection(section))
    }

    pub fn insert_node(&mut self, node: Node) -> Result<()> {
        let name = node.name().to_string();
        match self.entries.entry(name) {
            Entry::Vacant(slot) => {
                slot.insert(node);
                Ok(())
            }
            Entry::Occupied(mut slot) => {
                warn!(
                    collection = %self.label,
                    name = %slot.key(),
                    policy = ?self.policy,
                    "duplicate name"
                );
                let err = Error::duplicate_name(&self.label, slot.key());
                if self.policy == DuplicatePolicy::Replace {
                    slot.insert(node);
                }
                Err(err)
            }
        }
    }

    /// Inserts every entity, collecting conflicts instead of stopping at the first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use moose_input::{Collection, Entity, FieldMap};
    ///
    /// let mut vars = Collection::new("Variables").unwrap();
    /// let conflicts = vars.extend(
    ///     ["disp_x", "disp_y", "disp_x"]
    ///         .into_iter()
    ///         .map(|n| Entity::new(n, FieldMap::new()).unwrap()),
    /// );
    /// assert_eq!(conflicts.len(), 1);
    /// assert_eq!(vars.len(), 2);
    /// ```
    pub fn extend<I>(&mut self, entities: I) -> Vec<Error>
    where
        I: IntoIterator<Item = Entity>,
    {
        entities
            .into_iter()
            .filter_map(|entity| self.insert(entity).err())
            .collect()
    }

    /// Swaps the fields of a contained entity, returning the previous mapping.
    ///
    /// Entities are never mutated field-by-field once published; the whole
    /// mapping is replaced instead.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Custom`] when no entity of that name is a direct child.
    pub fn replace_fields(&mut self, name: &str, fields: FieldMap) -> Result<FieldMap> {
        match self.entries.get_mut(name) {
            Some(Node::Entity(entity)) => Ok(entity.replace_fields(fields)),
            _ => Err(Error::custom(format!(
                "no entity named '{}' in [{}]",
                name, self.label
            ))),
        }
    }

    /// Looks up a direct child entity by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.entries.get(name).and_then(Node::as_entity)
    }

    /// Looks up a direct child section by label.
    #[must_use]
    pub fn section(&self, label: &str) -> Option<&Collection> {
        self.entries.get(label).and_then(Node::as_collection)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates direct children in insertion order.
    pub fn nodes(&self) -> indexmap::map::Values<'_, String, Node> {
        self.entries.values()
    }

    /// Iterates direct child entities in insertion order, skipping nested sections.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entries.values().filter_map(Node::as_entity)
    }

    /// Records the name of every entity in this collection, at any depth.
    pub fn collect_names(&self, namespace: &mut Namespace) {
        for node in self.entries.values() {
            match node {
                Node::Entity(e) => {
                    namespace.insert(e.name());
                }
                Node::Collection(c) => c.collect_names(namespace),
            }
        }
    }

    /// Renders the section as unindented lines.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::DanglingReference`] from any contained entity.
    pub fn render<R: Resolver + ?Sized>(
        &self,
        resolver: &R,
        options: &RenderOptions,
    ) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        self.emit(&mut lines, resolver, options)?;
        Ok(lines)
    }

    pub(crate) fn emit<R: Resolver + ?Sized>(
        &self,
        out: &mut Vec<String>,
        resolver: &R,
        options: &RenderOptions,
    ) -> Result<()> {
        out.push(open_line(&self.label));
        for node in self.entries.values() {
            match node {
                Node::Entity(e) => e.emit(out, resolver, options)?,
                Node::Collection(c) => c.emit(out, resolver, options)?,
            }
        }
        emit_fields(&self.label, &self.fields, out, resolver, options)?;
        out.push(CLOSE.to_string());
        Ok(())
    }
}

impl From<Entity> for Node {
    fn from(entity: Entity) -> Self {
        Node::Entity(entity)
    }
}

impl From<Collection> for Node {
    fn from(collection: Collection) -> Self {
        Node::Collection(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(name: &str, order: &str) -> Entity {
        Entity::new(name, FieldMap::new())
            .unwrap()
            .with_field("order", order)
    }

    #[test]
    fn test_keep_first_policy() {
        let mut vars = Collection::new("Variables").unwrap();
        vars.insert(entity("T", "FIRST")).unwrap();
        let err = vars.insert(entity("T", "SECOND")).unwrap_err();

        assert_eq!(err, Error::duplicate_name("Variables", "T"));
        assert_eq!(vars.len(), 1);
        assert_eq!(vars.get("T").and_then(|e| e.get("order")), Some(&Value::from("FIRST")));
    }

    #[test]
    fn test_replace_policy_keeps_slot() {
        let mut vars = Collection::new("Variables")
            .unwrap()
            .with_policy(DuplicatePolicy::Replace);
        vars.insert(entity("a", "FIRST")).unwrap();
        vars.insert(entity("b", "FIRST")).unwrap();
        assert!(vars.insert(entity("a", "SECOND")).is_err());

        let names: Vec<_> = vars.nodes().map(Node::name).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(vars.get("a").and_then(|e| e.get("order")), Some(&Value::from("SECOND")));
    }

    #[test]
    fn test_empty_label_rejected() {
        assert!(matches!(Collection::new(""), Err(Error::InvalidName { .. })));
    }

    #[test]
    fn test_bracket_breaking_labels_rejected() {
        for label in ["Mesh\n[]", "Mesh]", "../", "./Kernels"] {
            assert!(
                matches!(Collection::new(label), Err(Error::InvalidName { .. })),
                "{:?} accepted",
                label
            );
        }
    }

    #[test]
    fn test_empty_collection_renders_pair() {
        let aux = Collection::new("AuxVariables").unwrap();
        let lines = aux
            .render(&Namespace::new(), &RenderOptions::default())
            .unwrap();
        assert_eq!(lines, vec!["[AuxVariables]", "[]"]);
    }

    #[test]
    fn test_nested_section() {
        let mut pressure = Collection::new("Pressure").unwrap();
        pressure
            .insert(Entity::new("side", FieldMap::new()).unwrap().with_field("factor", 1e5))
            .unwrap();
        let mut bcs = Collection::new("BCs").unwrap();
        bcs.insert_section(pressure).unwrap();

        let lines = bcs
            .render(&Namespace::new(), &RenderOptions::default())
            .unwrap();
        assert_eq!(
            lines,
            vec!["[BCs]", "[Pressure]", "[side]", "factor = 100000", "[]", "[]", "[]"]
        );
        assert!(bcs.section("Pressure").is_some());
        assert!(bcs.get("Pressure").is_none());
    }

    #[test]
    fn test_section_fields_after_children() {
        let mut mesh = Collection::new("Mesh")
            .unwrap()
            .with_field("second_order", true);
        mesh.insert(Entity::new("file", FieldMap::new()).unwrap().with_field("file", "mesh.e"))
            .unwrap();

        let lines = mesh
            .render(&Namespace::new(), &RenderOptions::default())
            .unwrap();
        assert_eq!(
            lines,
            vec!["[Mesh]", "[file]", "file = mesh.e", "[]", "second_order = true", "[]"]
        );
    }

    #[test]
    fn test_replace_fields() {
        let mut vars = Collection::new("Variables").unwrap();
        vars.insert(entity("T", "FIRST")).unwrap();

        let mut fresh = FieldMap::new();
        fresh.insert("order", "SECOND");
        let old = vars.replace_fields("T", fresh).unwrap();

        assert_eq!(old.get("order"), Some(&Value::from("FIRST")));
        assert_eq!(vars.get("T").and_then(|e| e.get("order")), Some(&Value::from("SECOND")));
        assert!(vars.replace_fields("missing", FieldMap::new()).is_err());
    }

    #[test]
    fn test_collect_names_recurses() {
        let mut inner = Collection::new("Pressure").unwrap();
        inner.insert(entity("deep", "FIRST")).unwrap();
        let mut outer = Collection::new("BCs").unwrap();
        outer.insert(entity("top", "FIRST")).unwrap();
        outer.insert_section(inner).unwrap();

        let mut ns = Namespace::new();
        outer.collect_names(&mut ns);
        assert!(ns.contains("top"));
        assert!(ns.contains("deep"));
        assert!(!ns.contains("Pressure"));
    }
}
