//! Configuration options for SLON parsing and serialization.
//!
//! - [`SlonOptions`]: layout of serialized output
//! - [`ParseOptions`]: how forgiving the parser is about document boundaries
//!
//! Both are plain values handed to each call; nothing is stored on a document.
//!
//! ## Examples
//!
//! ```rust
//! use slon::{from_str, to_string_with_options, SlonOptions};
//!
//! let doc = from_str(r#"{ name="demo" { id="1" } }"#).unwrap();
//!
//! let minimal = to_string_with_options(&doc, SlonOptions::minimal()).unwrap();
//! assert_eq!(minimal, r#"{name="demo"{id="1"}}"#);
//! ```

/// Indentation unit, repeated once per nesting level.
pub const INDENT: &str = "    ";

/// Configuration options for SLON serialization.
///
/// # Examples
///
/// ```rust
/// use slon::SlonOptions;
///
/// // One pair per line
/// let options = SlonOptions::new().with_values_in_line(false);
/// assert!(!options.values_in_line);
///
/// // No whitespace at all
/// let options = SlonOptions::minimal();
/// assert!(options.save_minimal);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlonOptions {
    /// Write all pairs of a block on one line, separated by spaces.
    pub values_in_line: bool,
    /// Drop every optional space and newline. Takes precedence over `values_in_line`.
    pub save_minimal: bool,
}

impl Default for SlonOptions {
    fn default() -> Self {
        SlonOptions {
            values_in_line: true,
            save_minimal: false,
        }
    }
}

impl SlonOptions {
    /// Creates default options (pairs in line, indented output).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use slon::SlonOptions;
    ///
    /// let options = SlonOptions::new();
    /// assert!(options.values_in_line);
    /// assert!(!options.save_minimal);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for the most compact output.
    #[must_use]
    pub fn minimal() -> Self {
        SlonOptions {
            save_minimal: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_values_in_line(mut self, values_in_line: bool) -> Self {
        self.values_in_line = values_in_line;
        self
    }

    #[must_use]
    pub fn with_save_minimal(mut self, save_minimal: bool) -> Self {
        self.save_minimal = save_minimal;
        self
    }
}

/// Configuration options for SLON parsing.
///
/// Text before the root block is always skipped. Beyond that the default
/// parser is lenient: anything after the root block is ignored, and running
/// out of input inside a block keeps what was closed so far. Strict parsing
/// rejects trailing content, unclosed blocks and input without a root.
///
/// # Examples
///
/// ```rust
/// use slon::{from_str_with_options, ParseOptions};
///
/// assert!(from_str_with_options("{ a=\"1\" ", ParseOptions::new()).is_ok());
/// assert!(from_str_with_options("{ a=\"1\" ", ParseOptions::strict()).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub strict: bool,
}

impl ParseOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Unbalanced braces, trailing content and a missing root become errors.
    #[must_use]
    pub fn strict() -> Self {
        ParseOptions { strict: true }
    }

    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
