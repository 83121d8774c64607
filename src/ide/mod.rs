//! Navigation features built on the parsed program.
//!
//! [`goto_definition`] is the entry point: give it a program, a cursor
//! offset, and optionally a [`ProgramStore`](crate::store::ProgramStore)
//! for cross-program jumps, and it answers with a [`ResolutionTarget`].
//! The class hierarchy walk that backs member resolution lives in
//! `hierarchy` and stays internal.

mod goto;
mod hierarchy;

pub use goto::{ResolutionTarget, goto_definition};
