//! SLON parsing.
//!
//! This module provides the [`Parser`], a hand-written finite-state automaton
//! that consumes one character per step from a [`CharSource`] and builds a
//! [`Document`].
//!
//! ## Overview
//!
//! - **Single pass**: no backtracking and no lookahead
//! - **Explicit block stack**: nesting depth is bounded only by memory, never by the call stack
//! - **Line tracking**: every `\n` bumps the line counter, whatever the state
//! - **First error wins**: parsing aborts on the first syntax error
//!
//! ## Usage
//!
//! Most users should use the functions in the crate root:
//!
//! ```rust
//! let doc = slon::from_str(r#"{ k1="v1" { k2="v2" } }"#).unwrap();
//! let root = doc.root().unwrap();
//!
//! assert_eq!(doc[root].get("k1"), Some("v1"));
//! let child = doc.child(root, 0).unwrap();
//! assert_eq!(doc[child].get("k2"), Some("v2"));
//! ```
//!
//! Driving the parser directly:
//!
//! ```rust
//! use slon::{Parser, ParseOptions, StrSource};
//!
//! let parser = Parser::with_options(StrSource::new("{ }"), ParseOptions::strict());
//! let doc = parser.parse().unwrap();
//! assert!(doc.root().is_some());
//! ```

use crate::source::CharSource;
use crate::tree::{Document, NodeId};
use crate::{Error, ParseOptions, Result};
use tracing::{debug, trace};

/// Automaton states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Skipping everything up to the first `{`.
    Start,
    /// Inside a block, between items.
    InBlock,
    /// Reading a key name.
    KeyScanning,
    /// Key finished by whitespace; only `=` may follow.
    KeyDone,
    /// Seen `=`; only an opening quote may follow.
    AwaitValue,
    /// Reading a quoted value.
    InValue,
    /// Discarding a comment; resumes `saved_state` at the newline.
    InComment,
    /// The root block has been closed.
    Done,
}

#[inline]
pub(crate) fn is_blank(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}

/// Characters allowed in keys: ASCII letters, digits, `_` and `-`.
#[inline]
pub(crate) fn is_ident(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '-'
}

/// The SLON parser.
///
/// Created with [`Parser::new`] or [`Parser::with_options`] and consumed by
/// [`Parser::parse`].
pub struct Parser<S> {
    source: S,
    options: ParseOptions,
    state: State,
    saved_state: State,
    line: usize,
    doc: Document,
    current: Option<NodeId>,
    key: String,
    value: String,
}

impl<S: CharSource> Parser<S> {
    pub fn new(source: S) -> Self {
        Self::with_options(source, ParseOptions::default())
    }

    pub fn with_options(source: S, options: ParseOptions) -> Self {
        Parser {
            source,
            options,
            state: State::Start,
            saved_state: State::Start,
            line: 1,
            doc: Document::new(),
            current: None,
            key: String::new(),
            value: String::new(),
        }
    }

    /// Runs the automaton to the end of the source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Syntax`] for the first grammar violation,
    /// [`Error::Io`] if the source fails, and in strict mode
    /// [`Error::UnexpectedEof`] or a trailing-content syntax error.
    pub fn parse(mut self) -> Result<Document> {
        debug!(strict = self.options.strict, "parsing SLON document");

        if let Err(err) = self.run() {
            debug!(line = self.line, %err, "SLON parse failed");
            return Err(err);
        }
        self.finish()
    }

    fn run(&mut self) -> Result<()> {
        while let Some(ch) = self.source.next_char()? {
            self.step(ch)?;
        }
        Ok(())
    }

    fn step(&mut self, ch: char) -> Result<()> {
        if ch == '#' && !matches!(self.state, State::InComment | State::InValue) {
            self.saved_state = self.state;
            self.state = State::InComment;
        }

        if ch == '\n' {
            self.line += 1;
        }

        match self.state {
            State::Start => self.start(ch),
            State::InBlock => self.in_block(ch),
            State::KeyScanning => self.key_scanning(ch),
            State::KeyDone => self.key_done(ch),
            State::AwaitValue => self.await_value(ch),
            State::InValue => self.in_value(ch),
            State::InComment => {
                if ch == '\n' {
                    self.state = self.saved_state;
                }
                Ok(())
            }
            State::Done => self.done(ch),
        }
    }

    fn start(&mut self, ch: char) -> Result<()> {
        if ch == '{' {
            let root = self.doc.open_node(None);
            self.doc.set_root_unchecked(root);
            self.current = Some(root);
            self.state = State::InBlock;
            trace!(line = self.line, "opened root block");
        }
        Ok(())
    }

    fn in_block(&mut self, ch: char) -> Result<()> {
        match ch {
            c if is_blank(c) => {}
            c if is_ident(c) => {
                self.key.clear();
                self.key.push(c);
                self.state = State::KeyScanning;
            }
            '{' => {
                self.current = Some(self.doc.open_node(self.current));
                trace!(line = self.line, "opened block");
            }
            '}' => self.close_block(),
            _ => return Err(Error::syntax(self.line, "key or node expected")),
        }
        Ok(())
    }

    fn close_block(&mut self) {
        let Some(id) = self.current else {
            return;
        };
        match self.doc.close_node(id) {
            Some(parent) => {
                self.current = Some(parent);
                trace!(line = self.line, "closed block");
            }
            None => {
                self.current = None;
                self.state = State::Done;
                trace!(line = self.line, "closed root block");
            }
        }
    }

    fn key_scanning(&mut self, ch: char) -> Result<()> {
        match ch {
            c if is_ident(c) => self.key.push(c),
            c if is_blank(c) => self.state = State::KeyDone,
            '=' => self.state = State::AwaitValue,
            _ => return Err(Error::syntax(self.line, "invalid character in key")),
        }
        Ok(())
    }

    fn key_done(&mut self, ch: char) -> Result<()> {
        match ch {
            c if is_blank(c) => {}
            '=' => self.state = State::AwaitValue,
            _ => return Err(Error::syntax(self.line, "assignment expected")),
        }
        Ok(())
    }

    fn await_value(&mut self, ch: char) -> Result<()> {
        match ch {
            c if is_blank(c) => {}
            '"' => {
                self.value.clear();
                self.state = State::InValue;
            }
            _ => return Err(Error::syntax(self.line, "quote expected")),
        }
        Ok(())
    }

    fn in_value(&mut self, ch: char) -> Result<()> {
        if ch != '"' {
            self.value.push(ch);
            return Ok(());
        }
        if let Some(id) = self.current {
            let key = std::mem::take(&mut self.key);
            let value = std::mem::take(&mut self.value);
            self.doc[id].set(key, value);
        }
        self.state = State::InBlock;
        Ok(())
    }

    fn done(&mut self, ch: char) -> Result<()> {
        if self.options.strict && !is_blank(ch) {
            return Err(Error::syntax(
                self.line,
                "trailing content after document root",
            ));
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Document> {
        let state = if self.state == State::InComment {
            self.saved_state
        } else {
            self.state
        };

        if self.options.strict {
            let expected = match state {
                State::Done => None,
                State::Start => Some("'{'"),
                State::InBlock => Some("'}'"),
                State::KeyScanning | State::KeyDone => Some("'='"),
                State::AwaitValue => Some("'\"'"),
                State::InValue | State::InComment => Some("closing '\"'"),
            };
            if let Some(expected) = expected {
                let err = Error::unexpected_eof(self.line, expected);
                debug!(line = self.line, %err, "SLON parse failed");
                return Err(err);
            }
        }

        // Blocks still open at end of input were never attached to a parent.
        self.doc.prune();
        debug!(
            lines = self.line,
            nodes = self.doc.len(),
            has_root = self.doc.root().is_some(),
            "parsed SLON document"
        );
        Ok(self.doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StrSource;

    fn parse(input: &str) -> Result<Document> {
        Parser::new(StrSource::new(input)).parse()
    }

    fn parse_strict(input: &str) -> Result<Document> {
        Parser::with_options(StrSource::new(input), ParseOptions::strict()).parse()
    }

    #[test]
    fn test_nested_blocks() {
        let doc = parse(r#"{ k1="v1" { k2="v2" } }"#).unwrap();
        let root = doc.root().unwrap();
        assert_eq!(doc[root].len(), 1);
        assert_eq!(doc[root].get("k1"), Some("v1"));
        assert_eq!(doc[root].child_count(), 1);

        let child = doc.child(root, 0).unwrap();
        assert_eq!(doc[child].get("k2"), Some("v2"));
        assert_eq!(doc[child].child_count(), 0);
        assert_eq!(doc[child].parent(), Some(root));
    }

    #[test]
    fn test_key_whitespace_around_assignment() {
        let doc = parse("{ name \t =\n  \"x\" }").unwrap();
        let root = doc.root().unwrap();
        assert_eq!(doc[root].get("name"), Some("x"));
    }

    #[test]
    fn test_value_is_verbatim() {
        let doc = parse("{ v=\"a # not a comment\nsecond { } line\" }").unwrap();
        let root = doc.root().unwrap();
        assert_eq!(
            doc[root].get("v"),
            Some("a # not a comment\nsecond { } line")
        );
    }

    #[test]
    fn test_comment_resumes_previous_state() {
        // The newline ending the comment is swallowed, so the key continues.
        let doc = parse("{ ke#x\ny=\"v\" }").unwrap();
        let root = doc.root().unwrap();
        assert_eq!(doc[root].get("key"), Some("v"));

        let doc = parse("{ key= # why\n \"v\" }").unwrap();
        let root = doc.root().unwrap();
        assert_eq!(doc[root].get("key"), Some("v"));
    }

    #[test]
    fn test_error_messages_and_lines() {
        let cases = [
            ("{ = }", 1, "key or node expected"),
            ("{\n\n ke.y=\"v\" }", 3, "invalid character in key"),
            ("{ key x }", 1, "assignment expected"),
            ("{\n key=x\n}", 2, "quote expected"),
        ];
        for (input, line, msg) in cases {
            assert_eq!(parse(input).unwrap_err(), Error::syntax(line, msg), "{input:?}");
        }
    }

    #[test]
    fn test_lines_counted_inside_comments_and_values() {
        let err = parse("# header\n{ a=\"1\n2\"\n # c\n ! }").unwrap_err();
        assert_eq!(err.line(), Some(5));
    }

    #[test]
    fn test_garbage_before_root_is_skipped() {
        let doc = parse("junk = \"x\" } \n{ a=\"1\" }").unwrap();
        let root = doc.root().unwrap();
        assert_eq!(doc[root].get("a"), Some("1"));
    }

    #[test]
    fn test_no_root() {
        assert!(parse("").unwrap().root().is_none());
        assert!(parse("no braces here").unwrap().root().is_none());
        assert!(parse("# only a comment { }\n").unwrap().root().is_none());
    }

    #[test]
    fn test_content_after_root_is_ignored() {
        let doc = parse("{ a=\"1\" } } { b=\"2\" }").unwrap();
        let root = doc.root().unwrap();
        assert_eq!(doc[root].get("a"), Some("1"));
        assert!(!doc[root].contains_key("b"));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_unclosed_blocks_are_dropped() {
        let doc = parse("{ a=\"1\" { b=\"2\" } { c=\"3\" { d=\"4\" }").unwrap();
        let root = doc.root().unwrap();
        assert_eq!(doc[root].get("a"), Some("1"));
        assert_eq!(doc[root].child_count(), 1);
        assert_eq!(doc.len(), 2);

        let doc = parse("{ a=\"1\" b=\"unterminated").unwrap();
        let root = doc.root().unwrap();
        assert_eq!(doc[root].keys().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn test_strict_mode() {
        assert!(parse_strict("pre { a=\"1\" } # trailing comment\n  ").is_ok());
        assert_eq!(
            parse_strict("{ } x").unwrap_err(),
            Error::syntax(1, "trailing content after document root")
        );
        assert_eq!(
            parse_strict("{\n{ }").unwrap_err(),
            Error::unexpected_eof(2, "'}'")
        );
        assert_eq!(parse_strict("").unwrap_err(), Error::unexpected_eof(1, "'{'"));
        assert_eq!(
            parse_strict("{ a=\"x").unwrap_err(),
            Error::unexpected_eof(1, "closing '\"'")
        );
        assert_eq!(
            parse_strict("{ a # c").unwrap_err(),
            Error::unexpected_eof(1, "'='")
        );
    }

    /// Serves `text`, then fails once; panics if polled after the failure.
    struct BrokenSource {
        chars: std::vec::IntoIter<char>,
        failed: bool,
    }

    impl CharSource for BrokenSource {
        fn next_char(&mut self) -> Result<Option<char>> {
            assert!(!self.failed, "source polled after it failed");
            match self.chars.next() {
                Some(ch) => Ok(Some(ch)),
                None => {
                    self.failed = true;
                    Err(Error::io("connection reset"))
                }
            }
        }
    }

    #[test]
    fn test_source_failure_aborts_parse() {
        for options in [ParseOptions::default(), ParseOptions::strict()] {
            let source = BrokenSource {
                chars: "{\n a=\"1\"".chars().collect::<Vec<_>>().into_iter(),
                failed: false,
            };
            let err = Parser::with_options(source, options).parse().unwrap_err();
            assert_eq!(err, Error::io("connection reset"));
            assert_eq!(err.line(), None);
        }
    }

    #[test]
    fn test_deep_nesting_does_not_recurse() {
        let depth = 100_000;
        let input = format!("{}{}", "{".repeat(depth), "}".repeat(depth));
        let doc = parse(&input).unwrap();
        assert_eq!(doc.len(), depth);
    }
}
