//! Go-to-definition behavior.
//!
//! `tests_goto_local` covers resolution inside a single program with no
//! store attached; `tests_goto_remote` covers everything that crosses
//! program boundaries.

pub mod tests_goto_local;
pub mod tests_goto_remote;
