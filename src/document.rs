//! Complete input documents.
//!
//! A [`Document`] is the ordered list of top-level sections and bare entities
//! making up one input file. It preserves whatever order the caller supplies;
//! choosing that order (mesh before variables before kernels, and so on) is up
//! to the code assembling the problem.
//!
//! Rendering resolves every reference against the document's [`Namespace`],
//! emits flat lines, then hands them to the [`indent`](crate::indent) pass. Any
//! failure aborts the whole render.

use crate::collection::Collection;
use crate::entity::Entity;
use crate::indent;
use crate::options::RenderOptions;
use crate::resolve::{Namespace, Resolver};
use crate::Result;
use tracing::debug;

/// A top-level item of a document.
#[derive(Clone, Debug, PartialEq)]
pub enum Item {
    Collection(Collection),
    Entity(Entity),
}

impl Item {
    /// The bracket tag this item opens with.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Item::Collection(c) => c.label(),
            Item::Entity(e) => e.name(),
        }
    }
}

impl From<Collection> for Item {
    fn from(collection: Collection) -> Self {
        Item::Collection(collection)
    }
}

impl From<Entity> for Item {
    fn from(entity: Entity) -> Self {
        Item::Entity(entity)
    }
}

/// One complete output file.
///
/// # Examples
///
/// ```rust
/// use moose_input::{Collection, Document, Entity, FieldMap};
///
/// let mut variables = Collection::new("Variables").unwrap();
/// for name in ["disp_x", "disp_y"] {
///     variables
///         .insert(Entity::new(name, FieldMap::new()).unwrap().with_field("order", "FIRST"))
///         .unwrap();
/// }
///
/// let mut doc = Document::new();
/// doc.push_collection(variables);
///
/// let text = doc.render().unwrap();
/// assert_eq!(
///     text,
///     "[Variables]\n  [disp_x]\n    order = FIRST\n  []\n  [disp_y]\n    order = FIRST\n  []\n[]\n"
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    items: Vec<Item>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Document { items: Vec::new() }
    }

    pub fn push(&mut self, item: impl Into<Item>) {
        self.items.push(item.into());
    }

    pub fn push_collection(&mut self, collection: Collection) {
        self.items.push(Item::Collection(collection));
    }

    /// Adds a bare top-level block such as `[Executioner]` or `[Outputs]`.
    pub fn push_entity(&mut self, entity: Entity) {
        self.items.push(Item::Entity(entity));
    }

    /// Builder form of [`Document::push`].
    #[must_use]
    pub fn with(mut self, item: impl Into<Item>) -> Self {
        self.push(item);
        self
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Finds the first top-level collection with this label.
    #[must_use]
    pub fn collection(&self, label: &str) -> Option<&Collection> {
        self.items.iter().find_map(|item| match item {
            Item::Collection(c) if c.label() == label => Some(c),
            _ => None,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Collects every entity name in the document, at any depth.
    ///
    /// This is the set references are resolved against.
    #[must_use]
    pub fn namespace(&self) -> Namespace {
        let mut namespace = Namespace::new();
        for item in &self.items {
            match item {
                Item::Collection(c) => c.collect_names(&mut namespace),
                Item::Entity(e) => {
                    namespace.insert(e.name());
                }
            }
        }
        namespace
    }

    /// Emits the unindented line stream, resolving references against `resolver`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DanglingReference`](crate::Error::DanglingReference) for
    /// the first reference that does not resolve.
    pub fn render_lines<R: Resolver + ?Sized>(
        &self,
        resolver: &R,
        options: &RenderOptions,
    ) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        for item in &self.items {
            match item {
                Item::Collection(c) => c.emit(&mut lines, resolver, options)?,
                Item::Entity(e) => e.emit(&mut lines, resolver, options)?,
            }
        }
        Ok(lines)
    }

    /// Renders the document with default options.
    ///
    /// # Errors
    ///
    /// See [`Document::render_with_options`].
    pub fn render(&self) -> Result<String> {
        self.render_with_options(&RenderOptions::default())
    }

    /// Renders the document to indented text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DanglingReference`](crate::Error::DanglingReference) when a
    /// reference names an entity absent from the document, and
    /// [`Error::MalformedDocument`](crate::Error::MalformedDocument) when the
    /// emitted brackets do not balance under a strict policy.
    pub fn render_with_options(&self, options: &RenderOptions) -> Result<String> {
        let namespace = self.namespace();
        let lines = self.render_lines(&namespace, options)?;
        debug!(
            items = self.items.len(),
            names = namespace.len(),
            lines = lines.len(),
            "rendered document"
        );
        indent::indent_lines(&lines, options)
    }
}

impl FromIterator<Item> for Document {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        Document {
            items: iter.into_iter().collect(),
        }
    }
}
