//! Bracket-driven indentation.
//!
//! Rendering happens in two stages. Entities and collections emit flat,
//! unindented lines; this pass then re-derives indentation by scanning those
//! lines for bracket markers. It knows nothing about documents, so it can be
//! exercised on plain strings.
//!
//! ## Rules
//!
//! A running `depth` starts at 0. For each line:
//!
//! - a close marker (`[]`, or the legacy `[../]`) decrements `depth` *before*
//!   the line is indented
//! - an open marker (`[name]`) is indented at the current depth, then `depth`
//!   is incremented for the lines that follow
//! - any other line is indented at the current depth
//!
//! So a block's brackets sit at the level of the enclosing block's body and its
//! fields sit one level deeper.
//!
//! ```rust
//! use moose_input::indent::indent;
//! use moose_input::RenderOptions;
//!
//! let flat = "[Variables]\n[T]\norder = FIRST\n[]\n[]";
//! let text = indent(flat, &RenderOptions::new()).unwrap();
//! assert_eq!(text, "[Variables]\n  [T]\n    order = FIRST\n  []\n[]\n");
//! ```
//!
//! Closes without a matching open, or opens left unclosed at the end, are a
//! malformed document. Under [`BalancePolicy::Strict`] that is an error; under
//! [`BalancePolicy::Clamp`] the printed depth is clamped at zero and a warning is
//! logged.

use crate::options::{BalancePolicy, RenderOptions};
use crate::{Error, Result};
use tracing::warn;

/// How a single line affects nesting depth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    Open,
    Close,
    Body,
}

/// Classifies a line by its trimmed content.
///
/// The legacy sub-block close `[../]` counts as a close marker.
///
/// # Examples
///
/// ```rust
/// use moose_input::indent::{classify, Marker};
///
/// assert_eq!(classify("[Kernels]"), Marker::Open);
/// assert_eq!(classify("  []"), Marker::Close);
/// assert_eq!(classify("[./old_style]"), Marker::Open);
/// assert_eq!(classify("[../]"), Marker::Close);
/// assert_eq!(classify("vector_value = \"1 0 0\""), Marker::Body);
/// ```
#[must_use]
pub fn classify(line: &str) -> Marker {
    let trimmed = line.trim();
    match trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    {
        Some(inner) if matches!(inner.trim(), "" | "../") => Marker::Close,
        Some(_) => Marker::Open,
        None => Marker::Body,
    }
}

/// Indents bracket-structured text.
///
/// Existing leading whitespace is discarded, blank lines stay empty, and every
/// output line ends with `\n` unless
/// [`trailing_newline`](RenderOptions::trailing_newline) is off.
///
/// # Errors
///
/// Returns [`Error::MalformedDocument`] under [`BalancePolicy::Strict`] when a
/// close marker has no matching open, or when opens remain at the end of input.
pub fn indent(text: &str, options: &RenderOptions) -> Result<String> {
    indent_lines(text.lines(), options)
}

/// Indents a stream of emitted lines.
///
/// Each item is one logical line and is classified as a whole. Line breaks
/// inside an item, such as those in a multi-line text value, are written
/// through verbatim: only the item's first physical line is indented, and its
/// continuation lines are never read as bracket markers.
///
/// # Examples
///
/// ```rust
/// use moose_input::indent::indent_lines;
/// use moose_input::RenderOptions;
///
/// let lines = ["[f]", "expression = a\n  b\n[]", "[]"];
/// let text = indent_lines(lines, &RenderOptions::new()).unwrap();
/// assert_eq!(text, "[f]\n  expression = a\n  b\n[]\n[]\n");
/// ```
///
/// # Errors
///
/// As for [`indent`].
pub fn indent_lines<I>(lines: I, options: &RenderOptions) -> Result<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut out = String::new();
    let mut depth: i64 = 0;
    let mut open_lines: Vec<usize> = Vec::new();
    let mut lines = lines.into_iter().enumerate().peekable();

    while let Some((idx, raw)) = lines.next() {
        let line = trim_line(raw.as_ref());
        let marker = classify(line);

        if marker == Marker::Close {
            depth -= 1;
            open_lines.pop();
            if depth < 0 {
                match options.balance {
                    BalancePolicy::Strict => {
                        return Err(Error::malformed(
                            idx + 1,
                            "close marker without matching open",
                        ))
                    }
                    BalancePolicy::Clamp => {
                        warn!(line = idx + 1, depth, "unmatched close marker, clamping")
                    }
                }
            }
        }

        if !line.is_empty() {
            let width = options.indent * depth.max(0) as usize;
            out.extend(std::iter::repeat(' ').take(width));
            out.push_str(line);
        }

        if marker == Marker::Open {
            depth += 1;
            open_lines.push(idx + 1);
        }

        if lines.peek().is_some() || options.trailing_newline {
            out.push('\n');
        }
    }

    if depth > 0 {
        match options.balance {
            BalancePolicy::Strict => {
                return Err(Error::malformed(
                    open_lines.last().copied().unwrap_or(0),
                    &format!("{} block(s) left open at end of document", depth),
                ))
            }
            BalancePolicy::Clamp => warn!(depth, "blocks left open at end of document"),
        }
    }

    Ok(out)
}

// Multi-line items keep their trailing text untouched.
fn trim_line(raw: &str) -> &str {
    let line = raw.trim_start();
    if line.contains('\n') {
        line
    } else {
        line.trim_end()
    }
}

/// Checks that bracket markers balance without producing output.
///
/// Returns the maximum nesting depth reached.
///
/// # Errors
///
/// Returns [`Error::MalformedDocument`] on the first imbalance, regardless of
/// any [`BalancePolicy`].
///
/// # Examples
///
/// ```rust
/// use moose_input::indent::check_balance;
///
/// assert_eq!(check_balance("[a]\n[b]\n[]\n[]").unwrap(), 2);
/// assert!(check_balance("[a]\n[]\n[]").is_err());
/// ```
pub fn check_balance(text: &str) -> Result<usize> {
    let mut depth = 0usize;
    let mut max_depth = 0usize;
    for (idx, line) in text.lines().enumerate() {
        match classify(line) {
            Marker::Open => {
                depth += 1;
                max_depth = max_depth.max(depth);
            }
            Marker::Close => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    Error::malformed(idx + 1, "close marker without matching open")
                })?;
            }
            Marker::Body => {}
        }
    }
    if depth != 0 {
        return Err(Error::malformed(
            text.lines().count(),
            &format!("{} block(s) left open at end of document", depth),
        ));
    }
    Ok(max_depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strict() -> RenderOptions {
        RenderOptions::new()
    }

    #[test]
    fn test_three_levels() {
        let flat = "[BCs]\n[Pressure]\n[side]\nfactor = 1\n[]\n[]\n[]";
        let expected = "[BCs]\n  [Pressure]\n    [side]\n      factor = 1\n    []\n  []\n[]\n";
        assert_eq!(indent(flat, &strict()).unwrap(), expected);
    }

    #[test]
    fn test_sibling_top_level_blocks() {
        let flat = "[Mesh]\n[]\n[Variables]\n[T]\n[]\n[]";
        let expected = "[Mesh]\n[]\n[Variables]\n  [T]\n  []\n[]\n";
        assert_eq!(indent(flat, &strict()).unwrap(), expected);
    }

    #[test]
    fn test_existing_indentation_discarded() {
        let flat = "    [a]\n x = 1\n        []";
        assert_eq!(indent(flat, &strict()).unwrap(), "[a]\n  x = 1\n[]\n");
    }

    #[test]
    fn test_blank_lines_stay_empty() {
        let flat = "[a]\n\nx = 1\n[]";
        assert_eq!(indent(flat, &strict()).unwrap(), "[a]\n\n  x = 1\n[]\n");
    }

    #[test]
    fn test_custom_width_and_no_trailing_newline() {
        let options = RenderOptions::new()
            .with_indent(4)
            .with_trailing_newline(false);
        assert_eq!(indent("[a]\nx = 1\n[]", &options).unwrap(), "[a]\n    x = 1\n[]");
    }

    #[test]
    fn test_strict_rejects_extra_close() {
        let err = indent("[a]\n[]\n[]", &strict()).unwrap_err();
        assert_eq!(err, Error::malformed(3, "close marker without matching open"));
    }

    #[test]
    fn test_strict_rejects_unclosed() {
        let err = indent("[a]\n[b]\nx = 1\n[]", &strict()).unwrap_err();
        assert!(matches!(err, Error::MalformedDocument { line: 1, .. }));
    }

    #[test]
    fn test_clamp_never_goes_negative() {
        let options = RenderOptions::new().with_balance(BalancePolicy::Clamp);
        let text = indent("[]\nx = 1\n[a]\ny = 2\n[]", &options).unwrap();
        assert_eq!(text, "[]\nx = 1\n[a]\ny = 2\n[]\n");
    }

    #[test]
    fn test_clamp_tolerates_unclosed() {
        let options = RenderOptions::new().with_balance(BalancePolicy::Clamp);
        let text = indent("[a]\nx = 1", &options).unwrap();
        assert_eq!(text, "[a]\n  x = 1\n");
    }

    #[test]
    fn test_multiline_item_kept_verbatim() {
        let lines = vec![
            "[Functions]".to_string(),
            "[f]".to_string(),
            "expression = a\n  b\n[]".to_string(),
            "[]".to_string(),
            "[]".to_string(),
        ];
        let text = indent_lines(&lines, &strict()).unwrap();
        assert_eq!(
            text,
            "[Functions]\n  [f]\n    expression = a\n  b\n[]\n  []\n[]\n"
        );
    }

    #[test]
    fn test_lines_and_text_agree_on_single_line_items() {
        let flat = "[a]\n  x = 1  \n\n[]";
        assert_eq!(
            indent(flat, &strict()).unwrap(),
            indent_lines(flat.lines(), &strict()).unwrap()
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(indent("", &strict()).unwrap(), "");
        assert_eq!(check_balance("").unwrap(), 0);
    }
}
