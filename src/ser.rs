//! SLON serialization.
//!
//! This module provides the [`Serializer`], which writes a [`Document`] back
//! out as SLON text.
//!
//! ## Layout
//!
//! Blocks are written depth-first, pre-order: the opening `{`, the block's
//! pairs as `key="value"`, its children one indentation level deeper, and the
//! closing `}`. [`SlonOptions`] picks between three shapes:
//!
//! ```text
//! default                 values_in_line = false     save_minimal = true
//! {                       {                          {a="1"b="2"{c="3"}}
//!     a="1" b="2"             a="1"
//!     {                       b="2"
//!         c="3"               {
//!     }                           c="3"
//! }                           }
//!                         }
//! ```
//!
//! Values are written verbatim. There is no escape syntax, so a key that is
//! not an identifier or a value containing `"` is refused with
//! [`Error::Unrepresentable`] instead of producing text that reads back
//! differently.
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use slon::{Document, Serializer, SlonOptions};
//!
//! let mut doc = Document::with_root();
//! let root = doc.root().unwrap();
//! doc[root].set("a", "1");
//!
//! let mut serializer = Serializer::new(SlonOptions::minimal());
//! serializer.serialize(&doc).unwrap();
//! assert_eq!(serializer.into_inner(), r#"{a="1"}"#);
//! ```

use crate::options::INDENT;
use crate::parser::is_ident;
use crate::tree::{Document, Node, NodeId};
use crate::{Error, Result, SlonOptions};
use tracing::debug;

enum Frame {
    Open(NodeId, usize),
    Close(usize),
}

/// The SLON serializer.
///
/// Accumulates text in memory; call [`Serializer::into_inner`] to take it.
pub struct Serializer {
    output: String,
    options: SlonOptions,
}

impl Serializer {
    pub fn new(options: SlonOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Appends `doc` to the output. A document without a root writes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unrepresentable`] for an empty or non-identifier key,
    /// or for a value containing `"`. Output written before the error is left
    /// in the buffer.
    pub fn serialize(&mut self, doc: &Document) -> Result<()> {
        let Some(root) = doc.root() else {
            return Ok(());
        };
        debug!(
            values_in_line = self.options.values_in_line,
            save_minimal = self.options.save_minimal,
            "serializing SLON document"
        );

        let mut stack = vec![Frame::Open(root, 0)];
        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Open(id, depth) => {
                    let node = &doc[id];
                    self.write_line_start(depth);
                    self.output.push('{');
                    self.write_newline();
                    self.write_entries(node, depth + 1)?;

                    stack.push(Frame::Close(depth));
                    stack.extend(
                        node.children()
                            .iter()
                            .rev()
                            .map(|&child| Frame::Open(child, depth + 1)),
                    );
                }
                Frame::Close(depth) => {
                    self.write_line_start(depth);
                    self.output.push('}');
                    self.write_newline();
                }
            }
        }
        Ok(())
    }

    fn write_entries(&mut self, node: &Node, depth: usize) -> Result<()> {
        if node.is_empty() {
            return Ok(());
        }

        if self.options.save_minimal {
            for (key, value) in node.iter() {
                self.write_pair(key, value)?;
            }
        } else if self.options.values_in_line {
            self.write_line_start(depth);
            for (i, (key, value)) in node.iter().enumerate() {
                if i > 0 {
                    self.output.push(' ');
                }
                self.write_pair(key, value)?;
            }
            self.write_newline();
        } else {
            for (key, value) in node.iter() {
                self.write_line_start(depth);
                self.write_pair(key, value)?;
                self.write_newline();
            }
        }
        Ok(())
    }

    fn write_pair(&mut self, key: &str, value: &str) -> Result<()> {
        if key.is_empty() {
            return Err(Error::unrepresentable(key, "key is empty"));
        }
        if !key.chars().all(is_ident) {
            return Err(Error::unrepresentable(
                key,
                "keys may only contain ASCII letters, digits, '_' and '-'",
            ));
        }
        if value.contains('"') {
            return Err(Error::unrepresentable(
                key,
                "value contains '\"', which has no escape in SLON",
            ));
        }

        self.output.push_str(key);
        self.output.push_str("=\"");
        self.output.push_str(value);
        self.output.push('"');
        Ok(())
    }

    fn write_line_start(&mut self, depth: usize) {
        if !self.options.save_minimal {
            for _ in 0..depth {
                self.output.push_str(INDENT);
            }
        }
    }

    fn write_newline(&mut self) {
        if !self.options.save_minimal {
            self.output.push('\n');
        }
    }
}
