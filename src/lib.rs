//! # moose_input
//!
//! A document model and renderer for the bracketed block input files read by
//! MOOSE-based multiphysics solvers.
//!
//! ## Overview
//!
//! An input file is a tree of named blocks. This crate models it with four
//! types, each depending only on the ones before it:
//!
//! - [`Value`]: a field value. Scalars, lists, and references to other blocks
//!   by name.
//! - [`Entity`]: a named block holding an ordered [`FieldMap`].
//! - [`Collection`]: a labelled section of uniquely named entities (and nested
//!   sections).
//! - [`Document`]: the ordered sequence of top-level sections and blocks.
//!
//! Rendering emits flat lines and then derives indentation from the bracket
//! markers (see [`indent`]). References are checked against every entity name
//! in the document; a dangling one aborts rendering.
//!
//! ## Quick Start
//!
//! ```rust
//! use moose_input::{fields, to_string, Collection, Document, Entity, Reference};
//!
//! let mut variables = Collection::new("Variables").unwrap();
//! variables
//!     .insert(Entity::new("temperature", fields! { "order" => "FIRST" }).unwrap())
//!     .unwrap();
//!
//! let mut kernels = Collection::new("Kernels").unwrap();
//! kernels
//!     .insert(
//!         Entity::new("heat", fields! {
//!             "type" => "ADHeatConduction",
//!             "variable" => Reference::to("temperature"),
//!         })
//!         .unwrap(),
//!     )
//!     .unwrap();
//!
//! let doc = Document::new().with(variables).with(kernels);
//! let text = to_string(&doc).unwrap();
//!
//! assert_eq!(
//!     text,
//!     "[Variables]\n  [temperature]\n    order = FIRST\n  []\n[]\n\
//!      [Kernels]\n  [heat]\n    type = ADHeatConduction\n    variable = temperature\n  []\n[]\n"
//! );
//! ```
//!
//! ## Producers
//!
//! Entity kinds can be described as plain structs and converted with
//! [`to_fields`] or [`Entity::from_serialize`], or checked against a per-kind
//! field table from the [`catalog`]:
//!
//! ```rust
//! use moose_input::catalog::{Family, Order, MOOSE_VARIABLE};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Variable {
//!     order: Order,
//!     family: Family,
//! }
//!
//! let disp_x = MOOSE_VARIABLE
//!     .build_from("disp_x", &Variable { order: Order::First, family: Family::Lagrange })
//!     .unwrap();
//! assert_eq!(disp_x.fields().len(), 3);
//! ```
//!
//! ## Errors
//!
//! All fallible operations return [`Result`]. Construction reports
//! [`Error::InvalidName`] and [`Error::DuplicateName`]; rendering reports
//! [`Error::DanglingReference`] and [`Error::MalformedDocument`].
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (`warn` for duplicate names and clamped
//! imbalance, `debug` for render summaries) and installs no subscriber.

pub mod catalog;
pub mod collection;
pub mod document;
pub mod entity;
pub mod error;
pub mod format;
pub mod indent;
pub mod macros;
pub mod map;
pub mod options;
pub mod resolve;
pub mod ser;
pub mod value;

pub use collection::{Collection, DuplicatePolicy, Node};
pub use document::{Document, Item};
pub use entity::Entity;
pub use error::{Error, Result};
pub use map::FieldMap;
pub use options::{BalancePolicy, RenderOptions};
pub use resolve::{Namespace, Resolver};
pub use ser::{to_field_value, to_fields, FieldsSerializer, ValueSerializer};
pub use value::{Field, Number, Quote, Reference, Scalar, UnresolvedReference, Value};

use std::io;

/// Renders a document with default options.
///
/// # Examples
///
/// ```rust
/// use moose_input::{to_string, Document, Entity, FieldMap};
///
/// let outputs = Entity::new("Outputs", FieldMap::new())
///     .unwrap()
///     .with_field("exodus", true);
/// let doc = Document::new().with(outputs);
///
/// assert_eq!(to_string(&doc).unwrap(), "[Outputs]\n  exodus = true\n[]\n");
/// ```
///
/// # Errors
///
/// Returns an error if a reference dangles or the output does not balance.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string(document: &Document) -> Result<String> {
    to_string_with_options(document, RenderOptions::default())
}

/// Renders a document with custom options.
///
/// # Examples
///
/// ```rust
/// use moose_input::{to_string_with_options, Document, Entity, FieldMap, RenderOptions};
///
/// let exec = Entity::new("Executioner", FieldMap::new())
///     .unwrap()
///     .with_field("type", "Steady");
/// let doc = Document::new().with(exec);
///
/// let text = to_string_with_options(&doc, RenderOptions::compact().with_indent(4)).unwrap();
/// assert_eq!(text, "[Executioner]\n    type=Steady\n[]\n");
/// ```
///
/// # Errors
///
/// Returns an error if a reference dangles or the output does not balance.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options(document: &Document, options: RenderOptions) -> Result<String> {
    document.render_with_options(&options)
}

/// Renders a document to a writer.
///
/// Nothing is written unless rendering succeeds.
///
/// # Examples
///
/// ```rust
/// use moose_input::{to_writer, Document, Entity, FieldMap};
///
/// let doc = Document::new().with(Entity::new("Outputs", FieldMap::new()).unwrap());
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &doc).unwrap();
/// assert_eq!(buffer, b"[Outputs]\n[]\n");
/// ```
///
/// # Errors
///
/// Returns an error if rendering fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(writer: W, document: &Document) -> Result<()>
where
    W: io::Write,
{
    to_writer_with_options(writer, document, RenderOptions::default())
}

/// Renders a document to a writer with custom options.
///
/// # Errors
///
/// Returns an error if rendering fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W>(
    mut writer: W,
    document: &Document,
    options: RenderOptions,
) -> Result<()>
where
    W: io::Write,
{
    let text = to_string_with_options(document, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}
