//! Named blocks of fields.
//!
//! An [`Entity`] renders as one bracketed block:
//!
//! ```text
//! [name]
//! field = value
//! []
//! ```
//!
//! The lines are emitted without indentation; the [`indent`](crate::indent) pass
//! adds it afterwards.

use crate::map::FieldMap;
use crate::options::RenderOptions;
use crate::resolve::Resolver;
use crate::value::{Field, Quote, Value};
use crate::{Error, Result};
use serde::Serialize;

/// A named node holding an ordered set of fields.
///
/// The kind tag is metadata for producers and callers; the core never writes it.
/// By convention producers emit it themselves as a `type` field (see
/// [`Schema::build`](crate::catalog::Schema::build)).
///
/// # Examples
///
/// ```rust
/// use moose_input::{Entity, FieldMap, Value};
///
/// let gravity = Entity::new("gravity", FieldMap::new())
///     .unwrap()
///     .with_kind("ADGravity")
///     .with_field("type", "ADGravity")
///     .with_field("variable", moose_input::Reference::to("disp_z"))
///     .with_field("value", -9.81);
///
/// assert_eq!(gravity.kind(), Some("ADGravity"));
/// assert_eq!(gravity.get("value"), Some(&Value::from(-9.81)));
/// assert!(gravity.get("block").is_none());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    name: String,
    kind: Option<String>,
    fields: FieldMap,
}

impl Entity {
    /// Creates an entity without a kind tag.
    ///
    /// Top-level singletons such as `[Executioner]` or `[Outputs]` have no kind;
    /// use [`Entity::tagged`] when one applies.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] when `name` cannot be written as a block
    /// header (see [`check_name`]).
    pub fn new(name: impl Into<String>, fields: FieldMap) -> Result<Self> {
        let name = name.into();
        check_name("entity", &name)?;
        Ok(Entity {
            name,
            kind: None,
            fields,
        })
    }

    /// Creates an entity carrying a kind tag.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use moose_input::{fields, Entity};
    ///
    /// let heat = Entity::tagged("heat", "ADHeatConduction", fields! { "variable" => "T" }).unwrap();
    /// assert_eq!(heat.kind(), Some("ADHeatConduction"));
    /// assert_eq!(heat.name(), "heat");
    /// ```
    pub fn tagged(
        name: impl Into<String>,
        kind: impl Into<String>,
        fields: FieldMap,
    ) -> Result<Self> {
        Ok(Entity::new(name, fields)?.with_kind(kind))
    }

    /// Creates an entity whose fields come from a serializable producer struct.
    ///
    /// See [`to_fields`](crate::to_fields) for how struct fields map onto values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use moose_input::Entity;
    /// use serde::Serialize;
    ///
    /// #[derive(Serialize)]
    /// struct Variable { order: &'static str, family: &'static str }
    ///
    /// let var = Entity::from_serialize("temperature", &Variable {
    ///     order: "FIRST",
    ///     family: "LAGRANGE",
    /// }).unwrap();
    /// assert_eq!(var.fields().len(), 2);
    /// ```
    pub fn from_serialize<T>(name: impl Into<String>, producer: &T) -> Result<Self>
    where
        T: ?Sized + Serialize,
    {
        Entity::new(name, crate::to_fields(producer)?)
    }

    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Appends (or overwrites in place) a field with the default quoting rule.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key, value);
        self
    }

    #[must_use]
    pub fn with_quoted(
        mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
        quote: Quote,
    ) -> Self {
        self.fields.insert_quoted(key, value, quote);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    /// Returns a field's value, or `None` when the field is absent.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    #[must_use]
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Swaps the whole field mapping, returning the old one.
    pub(crate) fn replace_fields(&mut self, fields: FieldMap) -> FieldMap {
        std::mem::replace(&mut self.fields, fields)
    }

    /// Renders the block as unindented lines.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DanglingReference`] naming this entity, the field and the
    /// missing target when a reference does not resolve.
    pub fn render<R: Resolver + ?Sized>(
        &self,
        resolver: &R,
        options: &RenderOptions,
    ) -> Result<Vec<String>> {
        let mut lines = Vec::with_capacity(self.fields.len() + 2);
        self.emit(&mut lines, resolver, options)?;
        Ok(lines)
    }

    pub(crate) fn emit<R: Resolver + ?Sized>(
        &self,
        out: &mut Vec<String>,
        resolver: &R,
        options: &RenderOptions,
    ) -> Result<()> {
        out.push(open_line(&self.name));
        emit_fields(&self.name, &self.fields, out, resolver, options)?;
        out.push(CLOSE.to_string());
        Ok(())
    }
}

pub(crate) const CLOSE: &str = "[]";

/// Checks that `name` can sit between brackets as a block header.
///
/// Refused: empty or whitespace-only names, names holding a line break or a
/// bracket, and names starting with `./` or `../` (the legacy sub-block
/// markers).
///
/// # Errors
///
/// Returns [`Error::InvalidName`] tagged with `what` and the reason.
///
/// # Examples
///
/// ```rust
/// use moose_input::entity::check_name;
///
/// assert!(check_name("entity", "disp_x").is_ok());
/// assert!(check_name("entity", "hs:copper").is_ok());
/// assert!(check_name("entity", "../").is_err());
/// assert!(check_name("collection", "a]b").is_err());
/// ```
pub fn check_name(what: &str, name: &str) -> Result<()> {
    let trimmed = name.trim();
    let reason = if trimmed.is_empty() {
        "names must be non-empty"
    } else if name.contains(['\n', '\r']) {
        "names must fit on one line"
    } else if name.contains(['[', ']']) {
        "names must not contain brackets"
    } else if trimmed.starts_with("./") || trimmed.starts_with("../") {
        "names must not start with a sub-block marker"
    } else {
        return Ok(());
    };
    Err(Error::invalid_name(what, name, reason))
}

pub(crate) fn open_line(name: &str) -> String {
    format!("[{}]", name)
}

pub(crate) fn emit_fields<R: Resolver + ?Sized>(
    owner: &str,
    fields: &FieldMap,
    out: &mut Vec<String>,
    resolver: &R,
    options: &RenderOptions,
) -> Result<()> {
    for (key, field) in fields {
        out.push(field_line(owner, key, field, resolver, options)?);
    }
    Ok(())
}

fn field_line<R: Resolver + ?Sized>(
    owner: &str,
    key: &str,
    field: &Field,
    resolver: &R,
    options: &RenderOptions,
) -> Result<String> {
    let rendered = field
        .render(resolver)
        .map_err(|missing| Error::dangling_reference(owner, key, &missing.0))?;
    Ok(format!("{}{}{}", key, options.separator, rendered))
}
