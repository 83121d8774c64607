// Syntax definitions for the PeopleCode subset
pub mod ast;

pub use ast::*;

// Re-export span types from base for convenience
pub use crate::base::{Span, TextSize};
