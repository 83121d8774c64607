//! Lexer and parser for the PeopleCode subset
//!
//! This module turns source text into the owned AST in [`crate::syntax`]:
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with TokenKind
//!     ↓
//! Parser (recursive descent) → syntax::Program
//! ```
//!
//! Parsing is all-or-nothing. A program that does not parse yields a
//! [`ParseError`]; resolution treats that like a program that could not be
//! fetched. There is no error recovery and no partial tree.

#[allow(clippy::module_inception)]
mod parser;

mod error;
mod lexer;
mod token_kind;

pub use error::ParseError;
pub use lexer::{Lexer, Token, tokenize};
pub use parser::parse_program;
pub use token_kind::TokenKind;
