//! Configuration options for rendering.
//!
//! - [`RenderOptions`]: main configuration struct
//! - [`BalancePolicy`]: what the indentation pass does with unbalanced brackets
//!
//! ## Examples
//!
//! ```rust
//! use moose_input::{BalancePolicy, RenderOptions};
//!
//! // Four-space indentation
//! let options = RenderOptions::new().with_indent(4);
//! assert_eq!(options.indent, 4);
//!
//! // `key=value` without padding, as older generators wrote it
//! let options = RenderOptions::compact();
//! assert_eq!(options.separator, "=");
//!
//! // Keep going on unbalanced input instead of failing
//! let options = RenderOptions::new().with_balance(BalancePolicy::Clamp);
//! ```

/// How the indentation pass treats bracket imbalance.
///
/// # Examples
///
/// ```rust
/// use moose_input::BalancePolicy;
///
/// assert_eq!(BalancePolicy::default(), BalancePolicy::Strict);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BalancePolicy {
    /// Fail with [`Error::MalformedDocument`](crate::Error::MalformedDocument)
    #[default]
    Strict,
    /// Clamp indentation at zero, log a warning and continue
    Clamp,
}

/// Configuration options for rendering a document.
///
/// # Examples
///
/// ```rust
/// use moose_input::RenderOptions;
///
/// let options = RenderOptions::new()
///     .with_indent(4)
///     .with_separator(" = ")
///     .with_trailing_newline(false);
/// assert!(!options.trailing_newline);
/// ```
#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub indent: usize,
    pub separator: String,
    pub balance: BalancePolicy,
    pub trailing_newline: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            indent: 2,
            separator: " = ".to_string(),
            balance: BalancePolicy::default(),
            trailing_newline: true,
        }
    }
}

impl RenderOptions {
    /// Creates default options (2-space indent, `key = value`, strict balance).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use moose_input::RenderOptions;
    ///
    /// let options = RenderOptions::new();
    /// assert_eq!(options.indent, 2);
    /// assert_eq!(options.separator, " = ");
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that write `key=value` with no padding around `=`.
    #[must_use]
    pub fn compact() -> Self {
        RenderOptions {
            separator: "=".to_string(),
            ..Default::default()
        }
    }

    /// Sets the number of spaces per nesting level.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the text placed between a field name and its value.
    #[must_use]
    pub fn with_separator(mut self, separator: &str) -> Self {
        self.separator = separator.to_string();
        self
    }

    #[must_use]
    pub fn with_balance(mut self, balance: BalancePolicy) -> Self {
        self.balance = balance;
        self
    }

    /// Controls whether the last line is followed by a newline.
    #[must_use]
    pub fn with_trailing_newline(mut self, trailing_newline: bool) -> Self {
        self.trailing_newline = trailing_newline;
        self
    }
}
