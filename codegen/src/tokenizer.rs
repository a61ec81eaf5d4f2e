//! Splits an expression into elements of the element table.
//!
//! Matching is first-prefix against [`ELEMENTS`]; a letter that matches no
//! entry is a variable. The input is uppercased once up front so offsets in
//! tokens are byte offsets into the caller's text.

use log::trace;

use crate::elements::{Element, ELEMENTS, FETCH_ELEMENT};
use crate::{CompileError, ErrorKind};

/// One recognized element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub element: Element,
    /// Variable index for a fetch, otherwise 0.
    pub variable: u8,
    /// Byte offset of the first character.
    pub position: usize,
    /// Number of bytes consumed.
    pub len: usize,
}

pub struct Tokenizer {
    text: String,
    position: usize,
}

impl Tokenizer {
    pub fn new(expression: &str) -> Self {
        Tokenizer {
            text: expression.to_ascii_uppercase(),
            position: 0,
        }
    }

    /// The uppercased input.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Byte offset of the next unread character.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Moves the cursor to `position`.
    pub fn seek(&mut self, position: usize) {
        self.position = position.min(self.text.len());
    }

    /// Returns the next token, or `None` at the end of the input.
    pub fn next_token(&mut self) -> Result<Option<Token>, CompileError> {
        let bytes = self.text.as_bytes();
        while bytes
            .get(self.position)
            .is_some_and(|b| b.is_ascii_whitespace())
        {
            self.position += 1;
        }

        let rest = &bytes[self.position..];
        let Some(&first) = rest.first() else {
            return Ok(None);
        };

        let token = if let Some(element) = ELEMENTS
            .iter()
            .find(|e| rest.starts_with(e.pattern.as_bytes()))
        {
            Token {
                element: *element,
                variable: 0,
                position: self.position,
                len: element.pattern.len(),
            }
        } else if first.is_ascii_uppercase() {
            Token {
                element: FETCH_ELEMENT,
                variable: first - b'A',
                position: self.position,
                len: 1,
            }
        } else {
            return Err(CompileError::new(ErrorKind::UnknownToken, self.position));
        };

        trace!(
            "Token {:?} ({:?}) at {}",
            &self.text[token.position..token.position + token.len],
            token.element.kind,
            token.position
        );
        self.position += token.len;
        Ok(Some(token))
    }
}
