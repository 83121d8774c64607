//! Program stores
//!
//! Cross-program navigation needs the text of other programs. A
//! [`ProgramStore`] answers `fetch(key) -> Option<String>`, where `None`
//! covers "no such program" and "could not be fetched" alike. Stores are
//! environment adapters; resolution carries one as `Option<&dyn
//! ProgramStore>` and degrades gracefully without one.
//!
//! [`load_program`] is the single fetch-and-parse path used by resolution.
//! Nothing in this crate caches parsed programs; a store that wants
//! memoization does it behind `fetch`.

mod fs;
mod memory;

use tracing::debug;

use crate::address::ProgramKey;
use crate::parser::parse_program;
use crate::syntax::Program;

pub use fs::DirStore;
pub use memory::MemoryStore;

/// Source of program text, keyed by [`ProgramKey`].
pub trait ProgramStore {
    /// The source of the program at `key`, or `None` when it does not
    /// exist or cannot be fetched.
    fn fetch(&self, key: &ProgramKey) -> Option<String>;
}

/// Fetch and parse the program at `key`.
///
/// A program that fetches but does not parse is treated exactly like a
/// miss; the parse error is logged and absorbed.
pub fn load_program(store: &dyn ProgramStore, key: &ProgramKey) -> Option<Program> {
    let source = store.fetch(key)?;
    match parse_program(&source) {
        Ok(program) => Some(program),
        Err(err) => {
            debug!("[STORE] program {} does not parse: {}", key, err);
            None
        }
    }
}
