//! Error types for building and rendering input documents.
//!
//! Errors fall into two groups:
//!
//! - **Construction errors** ([`Error::InvalidName`], [`Error::DuplicateName`],
//!   [`Error::MissingField`], [`Error::UnknownField`], [`Error::UnsupportedType`]):
//!   reported at the point an entity is built or inserted. The caller decides
//!   whether to skip, rename or abort; nothing already assembled is lost.
//! - **Render errors** ([`Error::DanglingReference`], [`Error::MalformedDocument`]):
//!   abort the render of the whole document. No partial text is produced.
//!
//! ## Examples
//!
//! ```rust
//! use moose_input::{Collection, Entity, Error, FieldMap};
//!
//! let mut variables = Collection::new("Variables").unwrap();
//! variables.insert(Entity::new("disp_x", FieldMap::new()).unwrap()).unwrap();
//!
//! let err = variables
//!     .insert(Entity::new("disp_x", FieldMap::new()).unwrap())
//!     .unwrap_err();
//! assert!(matches!(err, Error::DuplicateName { .. }));
//! assert!(err.is_recoverable());
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all errors that can occur while assembling or rendering a document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// An entity name or section label cannot be written as a block header
    #[error("Invalid name {name:?} for {what}: {reason}")]
    InvalidName {
        what: String,
        name: String,
        reason: String,
    },

    /// A name was inserted twice into the same collection
    #[error("Duplicate name '{name}' in [{collection}]")]
    DuplicateName { collection: String, name: String },

    /// A reference field names an entity that is not in the document
    #[error("Dangling reference in [{entity}] field '{field}': no entity named '{target}'")]
    DanglingReference {
        entity: String,
        field: String,
        target: String,
    },

    /// Bracket markers in the emitted text do not balance
    #[error("Malformed document at line {line}: {msg}")]
    MalformedDocument { line: usize, msg: String },

    /// A schema-required field was not supplied
    #[error("Missing required field '{field}' for {kind} '{entity}'")]
    MissingField {
        kind: String,
        entity: String,
        field: String,
    },

    /// A field was supplied that the kind's schema does not declare
    #[error("Unknown field '{field}' for {kind} '{entity}'")]
    UnknownField {
        kind: String,
        entity: String,
        field: String,
    },

    /// A producer value has no field representation
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// IO error while writing rendered text
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an invalid-name error describing what was being named and why
    /// the name was refused.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use moose_input::Error;
    ///
    /// let err = Error::invalid_name("entity", "", "names must be non-empty");
    /// assert!(err.to_string().contains("entity"));
    /// ```
    pub fn invalid_name(what: &str, name: &str, reason: &str) -> Self {
        Error::InvalidName {
            what: what.to_string(),
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates a duplicate-name error for `name` inside the `collection` section.
    pub fn duplicate_name(collection: &str, name: &str) -> Self {
        Error::DuplicateName {
            collection: collection.to_string(),
            name: name.to_string(),
        }
    }

    /// Creates a dangling-reference error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use moose_input::Error;
    ///
    /// let err = Error::dangling_reference("outlet", "input", "pipe");
    /// assert!(err.to_string().contains("'pipe'"));
    /// ```
    pub fn dangling_reference(entity: &str, field: &str, target: &str) -> Self {
        Error::DanglingReference {
            entity: entity.to_string(),
            field: field.to_string(),
            target: target.to_string(),
        }
    }

    /// Creates a malformed-document error at a 1-based line number.
    pub fn malformed(line: usize, msg: &str) -> Self {
        Error::MalformedDocument {
            line,
            msg: msg.to_string(),
        }
    }

    /// Creates an error for a required field absent from a kind's table.
    pub fn missing_field(kind: &str, entity: &str, field: &str) -> Self {
        Error::MissingField {
            kind: kind.to_string(),
            entity: entity.to_string(),
            field: field.to_string(),
        }
    }

    /// Creates an error for a field the kind's table does not declare.
    pub fn unknown_field(kind: &str, entity: &str, field: &str) -> Self {
        Error::UnknownField {
            kind: kind.to_string(),
            entity: entity.to_string(),
            field: field.to_string(),
        }
    }

    /// Creates an error for a producer value with no field representation.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error from the underlying failure's message.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns `true` for construction-time errors the caller can recover from
    /// without discarding the document under assembly.
    ///
    /// Render-time errors ([`Error::DanglingReference`], [`Error::MalformedDocument`])
    /// and I/O failures are not recoverable.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::InvalidName { .. }
                | Error::DuplicateName { .. }
                | Error::MissingField { .. }
                | Error::UnknownField { .. }
                | Error::UnsupportedType(_)
        )
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_split() {
        assert!(Error::invalid_name("entity", "", "names must be non-empty").is_recoverable());
        assert!(Error::unsupported_type("field names must be strings").is_recoverable());
        assert!(Error::duplicate_name("Kernels", "heat").is_recoverable());
        assert!(Error::missing_field("ADGravity", "g", "value").is_recoverable());
        assert!(!Error::dangling_reference("a", "b", "c").is_recoverable());
        assert!(!Error::malformed(3, "unmatched close").is_recoverable());
        assert!(!Error::io("disk full").is_recoverable());
    }

    #[test]
    fn test_messages() {
        let err = Error::duplicate_name("Variables", "disp_x");
        assert_eq!(err.to_string(), "Duplicate name 'disp_x' in [Variables]");

        let err = Error::malformed(7, "close marker without matching open");
        assert!(err.to_string().contains("line 7"));
    }
}
