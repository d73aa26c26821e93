//! Character sources for the parser.
//!
//! The parser pulls one `char` per step through [`CharSource`]. Two sources
//! are provided: [`StrSource`] over borrowed text and [`ReadSource`], which
//! decodes UTF-8 incrementally from any [`BufRead`] so large inputs are never
//! collected into a `String` first.

use crate::{Error, Result};
use std::io::{self, BufRead};
use std::str::Chars;

/// A "next character or end of input" pull interface.
pub trait CharSource {
    /// Returns the next character, `Ok(None)` at end of input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the underlying stream fails or yields bytes
    /// that are not valid UTF-8.
    fn next_char(&mut self) -> Result<Option<char>>;
}

/// Reads characters from a string slice.
pub struct StrSource<'a> {
    chars: Chars<'a>,
}

impl<'a> StrSource<'a> {
    pub fn new(input: &'a str) -> Self {
        StrSource {
            chars: input.chars(),
        }
    }
}

impl CharSource for StrSource<'_> {
    #[inline]
    fn next_char(&mut self) -> Result<Option<char>> {
        Ok(self.chars.next())
    }
}

/// Decodes UTF-8 characters from a buffered reader.
pub struct ReadSource<R> {
    reader: R,
}

impl<R: BufRead> ReadSource<R> {
    pub fn new(reader: R) -> Self {
        ReadSource { reader }
    }

    /// Gives the reader back, e.g. to continue reading past the document.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn next_byte(&mut self) -> Result<Option<u8>> {
        loop {
            let buf = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::io(&e.to_string())),
            };
            let Some(&byte) = buf.first() else {
                return Ok(None);
            };
            self.reader.consume(1);
            return Ok(Some(byte));
        }
    }
}

// Length of a UTF-8 sequence from its leading byte.
fn utf8_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

impl<R: BufRead> CharSource for ReadSource<R> {
    fn next_char(&mut self) -> Result<Option<char>> {
        let Some(lead) = self.next_byte()? else {
            return Ok(None);
        };
        if lead.is_ascii() {
            return Ok(Some(char::from(lead)));
        }

        let width =
            utf8_width(lead).ok_or_else(|| Error::io("stream did not contain valid UTF-8"))?;
        let mut bytes = [lead, 0, 0, 0];
        for slot in bytes.iter_mut().take(width).skip(1) {
            *slot = self
                .next_byte()?
                .ok_or_else(|| Error::io("stream ended inside a UTF-8 sequence"))?;
        }

        std::str::from_utf8(&bytes[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .map(Some)
            .ok_or_else(|| Error::io("stream did not contain valid UTF-8"))
    }
}
