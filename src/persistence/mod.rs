//! Durable storage for the cart snapshot: a string value per key, read once
//! at bootstrap and rewritten after every committed mutation.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::error;

/// Fixed key the whole cart snapshot lives under. The cart service is the
/// only writer of this key.
pub const CART_SNAPSHOT_KEY: &str = "cart";

/// Get/set of a single string value per key. Reads answer `None` for an
/// absent key; writes do not report failure to the caller (implementations
/// log instead).
pub trait SnapshotStore: Send {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str);
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// Process-local store. Handles are cheap clones sharing one map, so a
/// restarted service (or a test) can observe what an earlier owner wrote.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MemorySnapshot {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySnapshot {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemorySnapshot {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) {
        match self.entries.lock() {
            Ok(mut entries) => {
                entries.insert(key.to_string(), value.to_string());
            }
            Err(_) => error!(key, "Snapshot map poisoned, write dropped"),
        }
    }
}

// =============================================================================
// FILE STORE
// =============================================================================

/// One file per key under a directory: the durable analog of the browser
/// storage a cart snapshot traditionally lives in.
pub struct FileSnapshot {
    dir: PathBuf,
}

impl FileSnapshot {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl SnapshotStore for FileSnapshot {
    fn read(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn write(&self, key: &str, value: &str) {
        let result = fs::create_dir_all(&self.dir).and_then(|_| fs::write(self.path_for(key), value));
        if let Err(error) = result {
            error!(%error, key, "Snapshot write failed");
        }
    }
}
