//! Field values.
//!
//! This module provides the [`Value`] enum, the content of one field of an
//! [`Entity`](crate::Entity), together with the quoting rule that travels with it
//! in a [`Field`].
//!
//! ## Core Types
//!
//! - [`Scalar`]: a single literal (bool, number or text)
//! - [`Value`]: a scalar, a list of scalars, a [`Reference`] or a list of references
//! - [`Reference`]: a by-name link to another entity, resolved at render time
//! - [`Field`]: a value plus its [`Quote`] rule
//!
//! ## Creating Values
//!
//! ```rust
//! use moose_input::{Reference, Value};
//!
//! let order = Value::from("FIRST");
//! let gravity = Value::from(-9.81);
//! let scale = Value::from(vec![0.01, 0.01, 0.01]);
//! let input = Value::from(Reference::to("filemesh"));
//! let displacements = Value::references(["disp_x", "disp_y", "disp_z"]);
//!
//! assert!(order.is_scalar());
//! assert!(scale.is_list());
//! assert!(input.is_reference());
//! assert!(displacements.is_reference());
//! ```
//!
//! References never own the entity they point at. Only the name is stored, and
//! rendering only asks whether that name exists:
//!
//! ```rust
//! use moose_input::{Reference, Value};
//! use std::collections::HashSet;
//!
//! let names: HashSet<String> = ["pipe".to_string()].into_iter().collect();
//! let inlet = Value::from(Reference::port("pipe", "in"));
//! assert_eq!(inlet.render(&names).unwrap(), "pipe:in");
//!
//! let broken = Value::from(Reference::to("missing"));
//! assert_eq!(broken.render(&names).unwrap_err().0, "missing");
//! ```

use crate::resolve::Resolver;
use std::fmt;

/// A numeric literal.
///
/// # Examples
///
/// ```rust
/// use moose_input::Number;
///
/// assert_eq!(Number::Integer(3).to_string(), "3");
/// assert_eq!(Number::Float(-273.15).to_string(), "-273.15");
/// assert_eq!(Number::Float(1.0e9).to_string(), "1000000000");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Converts this number to an `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

/// A single literal value.
///
/// Renders as its natural textual form: booleans as `true`/`false`, numbers in
/// decimal, text verbatim.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Number(Number),
    Text(String),
}

impl Scalar {
    /// If the scalar is text, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

/// A non-owning link to another entity, by name.
///
/// An optional port is appended as `target:port` when rendered; flow-network
/// components use this to address one end of a channel (`pipe:in`, `pipe:out`).
/// Only the target name takes part in resolution.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Reference {
    target: String,
    port: Option<String>,
}

impl Reference {
    /// Creates a reference to the entity named `target`.
    #[must_use]
    pub fn to(target: impl Into<String>) -> Self {
        Reference {
            target: target.into(),
            port: None,
        }
    }

    /// Creates a reference to one port of the entity named `target`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use moose_input::Reference;
    ///
    /// let outlet = Reference::port("pipe", "out");
    /// assert_eq!(outlet.target(), "pipe");
    /// assert_eq!(outlet.to_string(), "pipe:out");
    /// ```
    #[must_use]
    pub fn port(target: impl Into<String>, port: impl Into<String>) -> Self {
        Reference {
            target: target.into(),
            port: Some(port.into()),
        }
    }

    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    #[must_use]
    pub fn port_name(&self) -> Option<&str> {
        self.port.as_deref()
    }

    fn render<R: Resolver + ?Sized>(
        &self,
        resolver: &R,
    ) -> std::result::Result<String, UnresolvedReference> {
        if resolver.resolves(&self.target) {
            Ok(self.to_string())
        } else {
            Err(UnresolvedReference(self.target.clone()))
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.port {
            Some(port) => write!(f, "{}:{}", self.target, port),
            None => f.write_str(&self.target),
        }
    }
}

impl From<&str> for Reference {
    fn from(target: &str) -> Self {
        Reference::to(target)
    }
}

/// The name a reference pointed at when the resolver did not know it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnresolvedReference(pub String);

/// The content of one field.
///
/// A value never embeds another entity; [`Value::Reference`] and
/// [`Value::References`] only carry names.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    List(Vec<Scalar>),
    Reference(Reference),
    References(Vec<Reference>),
}

impl Value {
    /// Builds a list-of-references value from target names.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use moose_input::{Reference, Value};
    ///
    /// let value = Value::references(["a", "b"]);
    /// assert_eq!(
    ///     value,
    ///     Value::References(vec![Reference::to("a"), Reference::to("b")])
    /// );
    /// ```
    #[must_use]
    pub fn references<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Value::References(targets.into_iter().map(Reference::to).collect())
    }

    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Value::Scalar(_))
    }

    /// Returns `true` for both kinds of list.
    #[inline]
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Value::List(_) | Value::References(_))
    }

    /// Returns `true` for a single reference or a list of references.
    #[inline]
    #[must_use]
    pub const fn is_reference(&self) -> bool {
        matches!(self, Value::Reference(_) | Value::References(_))
    }

    #[inline]
    #[must_use]
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(Scalar::as_str)
    }

    /// Returns every target name this value points at, in order.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        let refs: &[Reference] = match self {
            Value::Reference(r) => std::slice::from_ref(r),
            Value::References(rs) => rs,
            _ => &[],
        };
        refs.iter().map(Reference::target)
    }

    /// Renders the value without quoting.
    ///
    /// Lists are joined with a single space. References render as the target
    /// name; the first target the resolver does not know is returned as the
    /// error.
    pub fn render<R: Resolver + ?Sized>(
        &self,
        resolver: &R,
    ) -> std::result::Result<String, UnresolvedReference> {
        match self {
            Value::Scalar(s) => Ok(s.to_string()),
            Value::List(items) => Ok(join(items.iter().map(|s| s.to_string()))),
            Value::Reference(r) => r.render(resolver),
            Value::References(refs) => {
                let names = refs
                    .iter()
                    .map(|r| r.render(resolver))
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(names.join(" "))
            }
        }
    }
}

fn join<I: Iterator<Item = String>>(parts: I) -> String {
    parts.collect::<Vec<_>>().join(" ")
}

/// How a field's rendered value is wrapped in quotes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Quote {
    /// Lists in double quotes, single values bare
    #[default]
    Auto,
    Never,
    Double,
    Single,
}

impl Quote {
    /// Applies the rule to an already rendered value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use moose_input::{Quote, Value};
    ///
    /// let list = Value::from(vec![1, 2]);
    /// assert_eq!(Quote::Auto.apply(&list, "1 2".to_string()), "\"1 2\"");
    /// assert_eq!(Quote::Single.apply(&list, "1 2".to_string()), "'1 2'");
    /// assert_eq!(Quote::Never.apply(&list, "1 2".to_string()), "1 2");
    /// ```
    #[must_use]
    pub fn apply(self, value: &Value, rendered: String) -> String {
        match self {
            Quote::Auto if value.is_list() => format!("\"{}\"", rendered),
            Quote::Auto | Quote::Never => rendered,
            Quote::Double => format!("\"{}\"", rendered),
            Quote::Single => format!("'{}'", rendered),
        }
    }
}

/// A value together with its quoting rule.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub value: Value,
    pub quote: Quote,
}

impl Field {
    #[must_use]
    pub fn new(value: Value, quote: Quote) -> Self {
        Field { value, quote }
    }

    /// Renders and quotes the value.
    pub fn render<R: Resolver + ?Sized>(
        &self,
        resolver: &R,
    ) -> std::result::Result<String, UnresolvedReference> {
        let rendered = self.value.render(resolver)?;
        Ok(self.quote.apply(&self.value, rendered))
    }
}

impl From<Value> for Field {
    fn from(value: Value) -> Self {
        Field::new(value, Quote::Auto)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Number(Number::Integer(value as i64))
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Number(Number::Integer(value))
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Scalar::Number(Number::Integer(value as i64))
    }
}

impl From<u64> for Scalar {
    /// Values above `i64::MAX` become floats.
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(n) => Scalar::Number(Number::Integer(n)),
            Err(_) => Scalar::Number(Number::Float(value as f64)),
        }
    }
}

impl From<usize> for Scalar {
    fn from(value: usize) -> Self {
        Scalar::from(value as u64)
    }
}

impl From<f32> for Scalar {
    fn from(value: f32) -> Self {
        Scalar::Number(Number::Float(value as f64))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Number(Number::Float(value))
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<Scalar> for Value {
    fn from(value: Scalar) -> Self {
        Value::Scalar(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Scalar(value.into())
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Scalar(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Scalar(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Scalar(value.into())
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Scalar(value.into())
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::Scalar(value.into())
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Scalar(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Scalar(value.into())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Scalar(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Scalar(value.into())
    }
}

impl From<Reference> for Value {
    fn from(value: Reference) -> Self {
        Value::Reference(value)
    }
}

impl From<Vec<Reference>> for Value {
    fn from(value: Vec<Reference>) -> Self {
        Value::References(value)
    }
}

macro_rules! impl_from_vec {
    ($($ty:ty),*) => {
        $(
            impl From<Vec<$ty>> for Value {
                fn from(value: Vec<$ty>) -> Self {
                    Value::List(value.into_iter().map(Into::into).collect())
                }
            }
        )*
    };
}

impl_from_vec!(Scalar, bool, i32, i64, u32, u64, usize, f32, f64, &str, String);
