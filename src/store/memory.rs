//! In-memory program store.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::ProgramStore;
use crate::address::ProgramKey;

/// A keyed map of program sources.
///
/// Inserts take the write lock, `fetch` the read lock, so one store can
/// back any number of concurrent resolution calls. Key comparison is
/// case-insensitive through the key's segments.
#[derive(Default)]
pub struct MemoryStore {
    programs: RwLock<FxHashMap<ProgramKey, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, key: ProgramKey, source: impl Into<String>) {
        self.programs.write().insert(key, source.into());
    }

    pub fn remove(&self, key: &ProgramKey) -> Option<String> {
        self.programs.write().remove(key)
    }

    pub fn len(&self) -> usize {
        self.programs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.read().is_empty()
    }
}

impl ProgramStore for MemoryStore {
    fn fetch(&self, key: &ProgramKey) -> Option<String> {
        self.programs.read().get(key).cloned()
    }
}
