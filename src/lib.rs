//! # slon
//!
//! Parser and serializer for SLON, a small hierarchical text format of nested
//! brace-delimited blocks holding ordered string key/value pairs.
//!
//! ## What is SLON?
//!
//! A SLON document is a single root block. Each block holds `key="value"`
//! pairs and further blocks, freely interleaved. Every value is a string.
//! `#` starts a comment running to the end of the line, anywhere outside a
//! quoted value.
//!
//! ```text
//! # users known to the server
//! {
//!     title="users" version="2"
//!     {
//!         name="user1" admin="true"   # first
//!     }
//!     {
//!         name="user2"
//!     }
//! }
//! ```
//!
//! See the [`format`] module for the full grammar.
//!
//! ## Key Features
//!
//! - **Streaming parser**: a hand-written state machine pulling one character at a time,
//!   with line numbers in every syntax error
//! - **Ordered pairs**: keys iterate in first-insertion order, even across overwrites
//! - **Arena tree**: [`Document`] owns all blocks; [`NodeId`] handles give parent and child links
//! - **No recursion**: parsing, serialization and equality use explicit stacks
//!   (serde conversion is nested and capped at [`MAX_SERDE_DEPTH`] blocks)
//! - **Serde interop**: documents convert to and from any serde format
//!
//! ## Quick Start
//!
//! ```rust
//! use slon::{from_str, to_string_with_options, SlonOptions};
//!
//! let doc = from_str(r#"
//!     {
//!         title="users"
//!         { name="user1" }   # first user
//!         { name="user2" }
//!     }
//! "#).unwrap();
//!
//! let root = doc.root().unwrap();
//! assert_eq!(doc[root].get("title"), Some("users"));
//!
//! let user2 = doc.find_child(root, "name", "user2").unwrap();
//! assert_eq!(doc[user2].parent(), Some(root));
//!
//! let text = to_string_with_options(&doc, SlonOptions::minimal()).unwrap();
//! assert_eq!(text, r#"{title="users"{name="user1"}{name="user2"}}"#);
//! ```
//!
//! ## Errors
//!
//! Parsing stops at the first grammar violation and reports its line:
//!
//! ```rust
//! let err = slon::from_str("{\n  key=x\n}").unwrap_err();
//! assert_eq!(err.line(), Some(2));
//! ```
//!
//! Key lookups and child indexing never fail; they return `Option`.

pub mod entries;
pub mod error;
pub mod format;
pub mod options;
pub mod parser;
pub mod ser;
mod serde_impl;
pub mod source;
pub mod tree;

pub use entries::Entries;
pub use error::{Error, Result};
pub use options::{ParseOptions, SlonOptions, INDENT};
pub use parser::Parser;
pub use serde_impl::MAX_SERDE_DEPTH;
pub use ser::Serializer;
pub use source::{CharSource, ReadSource, StrSource};
pub use tree::{Descendants, Document, Node, NodeId};

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

/// Parse a SLON document from a string.
///
/// Text before the first `{` is skipped; if there is no `{` at all the
/// returned document has no root.
///
/// # Examples
///
/// ```rust
/// let doc = slon::from_str(r#"{ a="1" }"#).unwrap();
/// let root = doc.root().unwrap();
/// assert_eq!(doc[root].get("a"), Some("1"));
///
/// assert!(slon::from_str("nothing here").unwrap().root().is_none());
/// ```
///
/// # Errors
///
/// Returns [`Error::Syntax`] with the offending line on malformed input.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(s: &str) -> Result<Document> {
    from_str_with_options(s, ParseOptions::default())
}

/// Parse a SLON document from a string with custom options.
///
/// # Errors
///
/// Returns [`Error::Syntax`] on malformed input, and in strict mode
/// [`Error::UnexpectedEof`] when blocks are left open.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options(s: &str, options: ParseOptions) -> Result<Document> {
    Parser::with_options(StrSource::new(s), options).parse()
}

/// Parse a SLON document from UTF-8 bytes.
///
/// # Errors
///
/// Returns [`Error::Io`] if the bytes are not valid UTF-8, otherwise as [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(v: &[u8]) -> Result<Document> {
    let s = std::str::from_utf8(v).map_err(|e| Error::io(&e.to_string()))?;
    from_str(s)
}

/// Parse a SLON document from an I/O stream.
///
/// The reader is buffered internally and consumed character by character;
/// it is dropped when parsing ends, whether or not it succeeded.
///
/// # Examples
///
/// ```rust
/// use std::io::Cursor;
///
/// let doc = slon::from_reader(Cursor::new(b"{ a=\"1\" }")).unwrap();
/// assert_eq!(doc.root_node().unwrap().get("a"), Some("1"));
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails or the stream is not UTF-8, and
/// [`Error::Syntax`] on malformed input.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R: io::Read>(reader: R) -> Result<Document> {
    from_reader_with_options(reader, ParseOptions::default())
}

/// Parse a SLON document from an I/O stream with custom options.
///
/// # Errors
///
/// As [`from_reader`] and [`from_str_with_options`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader_with_options<R: io::Read>(reader: R, options: ParseOptions) -> Result<Document> {
    Parser::with_options(ReadSource::new(BufReader::new(reader)), options).parse()
}

/// Open and parse a SLON file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened or read, otherwise as [`from_reader`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let file = File::open(path.as_ref()).map_err(|e| Error::io(&e.to_string()))?;
    from_reader(file)
}

/// Serialize a document to a SLON string with default options.
///
/// # Examples
///
/// ```rust
/// let doc = slon::from_str(r#"{a="1" b="2"}"#).unwrap();
/// assert_eq!(slon::to_string(&doc).unwrap(), "{\n    a=\"1\" b=\"2\"\n}\n");
/// ```
///
/// # Errors
///
/// Returns [`Error::Unrepresentable`] if a key is not an identifier or a
/// value contains `"`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string(doc: &Document) -> Result<String> {
    to_string_with_options(doc, SlonOptions::default())
}

/// Serialize a document to a SLON string with custom options.
///
/// # Examples
///
/// ```rust
/// use slon::{to_string_with_options, SlonOptions};
///
/// let doc = slon::from_str(r#"{a="1" b="2"}"#).unwrap();
/// let options = SlonOptions::new().with_values_in_line(false);
/// assert_eq!(
///     to_string_with_options(&doc, options).unwrap(),
///     "{\n    a=\"1\"\n    b=\"2\"\n}\n"
/// );
/// ```
///
/// # Errors
///
/// As [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options(doc: &Document, options: SlonOptions) -> Result<String> {
    let mut serializer = Serializer::new(options);
    serializer.serialize(doc)?;
    Ok(serializer.into_inner())
}

/// Serialize a document to a writer with default options.
///
/// # Errors
///
/// Returns [`Error::Unrepresentable`] before anything is written, or
/// [`Error::Io`] if writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W: io::Write>(writer: W, doc: &Document) -> Result<()> {
    to_writer_with_options(writer, doc, SlonOptions::default())
}

/// Serialize a document to a writer with custom options.
///
/// The text is rendered completely before the first write, so a refused
/// document leaves the writer untouched.
///
/// # Errors
///
/// As [`to_writer`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W: io::Write>(
    mut writer: W,
    doc: &Document,
    options: SlonOptions,
) -> Result<()> {
    let text = to_string_with_options(doc, options)?;
    writer
        .write_all(text.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Create or truncate a file and write the document into it.
///
/// # Errors
///
/// As [`to_writer`], plus [`Error::Io`] if the file cannot be created.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_file<P: AsRef<Path>>(path: P, doc: &Document, options: SlonOptions) -> Result<()> {
    let text = to_string_with_options(doc, options)?;
    std::fs::write(path.as_ref(), text).map_err(|e| Error::io(&e.to_string()))
}
