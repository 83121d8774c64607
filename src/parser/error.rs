//! Error types for PeopleCode parsing.

use thiserror::Error;

use super::token_kind::TokenKind;
use crate::base::TextSize;

/// Errors that can occur while parsing a PeopleCode program.
///
/// Parsing is all-or-nothing: callers resolving against a fetched program
/// treat any parse error the same as a store miss.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The parser found a token it cannot accept here.
    #[error("expected {expected} but found {found} at offset {offset:?}")]
    Unexpected {
        expected: String,
        found: &'static str,
        offset: TextSize,
    },

    /// Input ended in the middle of a construct.
    #[error("unexpected end of program, expected {expected}")]
    UnexpectedEof { expected: String },

    /// The lexer could not recognize the input at this offset.
    #[error("unrecognized text at offset {offset:?}")]
    Lex { offset: TextSize },
}

impl ParseError {
    pub fn unexpected(expected: impl Into<String>, found: TokenKind, offset: TextSize) -> Self {
        Self::Unexpected {
            expected: expected.into(),
            found: found.describe(),
            offset,
        }
    }

    pub fn eof(expected: impl Into<String>) -> Self {
        Self::UnexpectedEof {
            expected: expected.into(),
        }
    }
}
