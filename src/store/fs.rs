//! Directory-backed program store.

use std::path::PathBuf;

use tracing::debug;

use super::ProgramStore;
use crate::address::ProgramKey;

/// A store over an exported program tree.
///
/// The program keyed `A.B.C` lives at `<root>/A/B/C.pcode`; every segment
/// but the last becomes a directory. Lookups never scan the tree, each key
/// maps to exactly one path. Path matching is as case-sensitive as the
/// underlying filesystem.
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirStore { root: root.into() }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    /// The file path a key maps to.
    pub fn path_for(&self, key: &ProgramKey) -> PathBuf {
        let mut path = self.root.clone();
        if let Some((last, dirs)) = key.segments().split_last() {
            for segment in dirs {
                path.push(segment.value.as_str());
            }
            path.push(format!("{}.pcode", last.value));
        }
        path
    }
}

impl ProgramStore for DirStore {
    fn fetch(&self, key: &ProgramKey) -> Option<String> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(source) => Some(source),
            Err(err) => {
                debug!("[STORE] no program at {}: {}", path.display(), err);
                None
            }
        }
    }
}
