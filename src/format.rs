//! SLON Format Specification
//!
//! This module documents the SLON text format as implemented by this library.
//!
//! # Overview
//!
//! SLON sits somewhere between XML and INI: a document is one block in curly
//! braces, and blocks nest. A block holds `key="value"` pairs and child
//! blocks in any order. All values are strings; typed reads such as
//! [`Node::get_i64`](crate::Node::get_i64) are conventions layered on top.
//!
//! # Grammar
//!
//! ```text
//! document   := garbage* block
//! block      := '{' ws* (pair | block)* ws* '}'
//! pair       := ident ws* '=' ws* '"' valuechar* '"'
//! ident      := identchar+
//! identchar  := letter | digit | '_' | '-'
//! valuechar  := any character except '"'
//! comment    := '#' any-character-except-newline* '\n'
//! ws         := space | tab | '\n' | '\r'
//! ```
//!
//! Letters and digits are ASCII only.
//!
//! ## Blocks
//!
//! - Everything before the first `{` is skipped, so a file may start with a
//!   banner or license text.
//! - Children keep the order in which they appear.
//! - What follows the closing brace of the root is ignored, unless parsing
//!   with [`ParseOptions::strict`](crate::ParseOptions::strict).
//!
//! ## Pairs
//!
//! - Whitespace is allowed around `=`, but not inside a key.
//! - Keys are unique within a block. A repeated key overwrites the earlier
//!   value and keeps the earlier position.
//! - Consecutive pairs need no separator: `{a="1"b="2"}` is valid.
//!
//! ## Values
//!
//! Values are taken verbatim up to the next `"`: newlines, `#`, braces and
//! non-ASCII text are all kept. There are **no escape sequences**, so a value
//! can never contain `"`. The serializer refuses such values.
//!
//! ## Comments
//!
//! `#` starts a comment anywhere outside a quoted value and runs to the end of
//! the line. The newline that ends a comment belongs to the comment, so
//! scanning resumes exactly where it left off:
//!
//! ```text
//! { ke# split key
//! y="v" }          # same as { key="v" }
//! ```
//!
//! # Errors
//!
//! | Situation                               | Message                   |
//! |-----------------------------------------|---------------------------|
//! | Neither key nor `{`/`}` inside a block  | `key or node expected`    |
//! | Bad character while reading a key       | `invalid character in key`|
//! | Something other than `=` after a key    | `assignment expected`     |
//! | Something other than `"` after `=`      | `quote expected`          |
//!
//! Line numbers are 1-based and count every `\n`, including those inside
//! values and comments.
//!
//! # Output Layout
//!
//! Indentation is four spaces per level. See [`crate::ser`] for the three
//! layouts selected by [`SlonOptions`](crate::SlonOptions).
