//! Key to clip-file lookup
//!
//! Built once at startup, never mutated. A key without a clip on disk
//! simply has no entry; pressing it is a silent no-op downstream.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::keypad::CLIP_EXT;

use super::Key;

/// Fixed mapping from keys to clip files
#[derive(Debug, Clone, Default)]
pub struct SoundMap {
    entries: HashMap<Key, PathBuf>,
}

impl SoundMap {
    /// Build from a directory using the default layout `<dir>/<token>.wav`
    pub fn from_dir(dir: &Path) -> Self {
        Self::with_extension(dir, CLIP_EXT)
    }

    /// Build from a directory with a custom clip extension.
    ///
    /// Only files that exist at scan time are mapped; missing clips leave
    /// their key unmapped rather than pointing at a dead path.
    pub fn with_extension(dir: &Path, ext: &str) -> Self {
        let mut entries = HashMap::new();
        for key in Key::ALL {
            let path = dir.join(format!("{}.{}", key.token(), ext));
            if path.is_file() {
                entries.insert(key, path);
            }
        }
        Self { entries }
    }

    /// Build from explicit entries (custom layouts, tests)
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Key, PathBuf)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Clip path for a key, if one is mapped
    pub fn resolve(&self, key: Key) -> Option<&Path> {
        self.entries.get(&key).map(PathBuf::as_path)
    }

    /// Number of mapped keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
