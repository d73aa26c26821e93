//! Error types for SLON parsing, serialization and tree building.
//!
//! ## Error Categories
//!
//! - **Syntax Errors**: grammar violations, always carrying the 1-based line number
//! - **I/O Errors**: the underlying reader or writer failed, or the input was not UTF-8
//! - **Value Errors**: a typed accessor could not coerce a stored string
//! - **Unrepresentable Data**: a key or value that cannot be written back as SLON
//! - **Tree Errors**: misuse of the node arena (attaching a node twice, cycles)
//!
//! Missing keys and out-of-range child indices are not errors; those lookups
//! return `Option`.
//!
//! ## Examples
//!
//! ```rust
//! use slon::{from_str, Error};
//!
//! let err = from_str("{\n  key=x\n}").unwrap_err();
//! assert!(matches!(err, Error::Syntax { line: 2, .. }));
//! assert_eq!(err.to_string(), "Syntax error at line 2: quote expected");
//! ```

use thiserror::Error;

/// Represents all possible errors produced by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Grammar violation; parsing stops at the first one
    #[error("Syntax error at line {line}: {msg}")]
    Syntax { line: usize, msg: String },

    /// Input ended while a construct was still open (strict parsing only)
    #[error("Unexpected end of input at line {line}, expected {expected}")]
    UnexpectedEof { line: usize, expected: String },

    /// A stored string could not be read as the requested type
    #[error("Invalid value for key '{key}': expected {expected}, found \"{found}\"")]
    InvalidValue {
        key: String,
        expected: String,
        found: String,
    },

    /// Key or value that would not survive a write/read cycle
    #[error("Cannot write key '{key}': {reason}")]
    Unrepresentable { key: String, reason: String },

    /// Invalid parent/child wiring in a document
    #[error("Invalid attach: {0}")]
    InvalidAttach(String),
}

impl Error {
    /// Creates a syntax error at the given 1-based line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use slon::Error;
    ///
    /// let err = Error::syntax(10, "assignment expected");
    /// assert!(err.to_string().contains("line 10"));
    /// ```
    pub fn syntax(line: usize, msg: &str) -> Self {
        Error::Syntax {
            line,
            msg: msg.to_string(),
        }
    }

    /// Creates an unexpected end-of-input error.
    pub fn unexpected_eof(line: usize, expected: &str) -> Self {
        Error::UnexpectedEof {
            line,
            expected: expected.to_string(),
        }
    }

    pub fn invalid_value(key: &str, expected: &str, found: &str) -> Self {
        Error::InvalidValue {
            key: key.to_string(),
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub fn unrepresentable(key: &str, reason: &str) -> Self {
        Error::Unrepresentable {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid_attach(msg: &str) -> Self {
        Error::InvalidAttach(msg.to_string())
    }

    /// Creates an I/O error for stream reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Line number attached to the error, if it came from the parser.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Syntax { line, .. } | Error::UnexpectedEof { line, .. } => Some(*line),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
