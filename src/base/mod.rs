//! Foundation types for the pcnav toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`Name`] - Case-preserving, case-insensitive identifiers
//! - [`Span`], [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//!
//! This module has NO dependencies on other pcnav modules.

mod name;
mod span;

pub use name::Name;
pub use span::{Span, TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
