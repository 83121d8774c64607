//! # pcnav-base
//!
//! Core library for PeopleCode parsing and go-to-definition resolution.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → go-to-definition, class hierarchy walk
//!   ↓
//! store     → program sources by key (in-memory, directory tree)
//!   ↓
//! scope     → position-aware variable binding lookup
//!   ↓
//! address   → ProgramKey, caption parsing
//!   ↓
//! syntax    → AST types, Span
//!   ↓
//! parser    → Logos lexer, recursive-descent parser
//!   ↓
//! base      → Primitives (Name, TextRange)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → syntax → address → scope → store → ide)
// ============================================================================

/// Foundation types: case-insensitive Name, TextRange
pub mod base;

/// Parser: Logos lexer, recursive-descent parser
pub mod parser;

/// Syntax: AST types, Span
pub mod syntax;

/// Program addressing: typed keys, caption parsing
pub mod address;

/// Scope tracking: which bindings are visible at an offset
pub mod scope;

/// Program stores: fetch source text by key
pub mod store;

/// IDE features: go-to-definition
pub mod ide;

// Re-export foundation types
pub use base::{Name, Span, TextRange, TextSize};

// Re-export the main entry points
pub use address::{ProgramCategory, ProgramKey};
pub use ide::{ResolutionTarget, goto_definition};
pub use parser::parse_program;
pub use store::{DirStore, MemoryStore, ProgramStore};
