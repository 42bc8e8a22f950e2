//! Ephemeral result store
//!
//! Process-wide mapping from a generated identifier to a converted file,
//! populated after a successful conversion and read by the download
//! endpoint. Entries are not consumed by reads; they expire after a TTL
//! instead of living for the whole process.

use crate::convert::Converted;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Default entry lifetime: one hour.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

struct StoredEntry {
    file: Converted,
    stored_at: Instant,
}

/// Synchronized in-memory store of conversion results
pub struct ResultStore {
    ttl: Duration,
    entries: RwLock<HashMap<Uuid, StoredEntry>>,
}

impl ResultStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Store a result under a fresh identifier and return it. Identifier
    /// uniqueness per request comes from v4 generation.
    pub fn put(&self, file: Converted) -> Uuid {
        let id = Uuid::new_v4();
        self.entries.write().unwrap().insert(
            id,
            StoredEntry {
                file,
                stored_at: Instant::now(),
            },
        );
        id
    }

    /// Fetch a stored result. Returns `None` for unknown identifiers and
    /// for entries whose TTL has elapsed; expired entries are dropped on
    /// the spot. Live entries can be fetched repeatedly.
    pub fn get(&self, id: &Uuid) -> Option<Converted> {
        {
            let entries = self.entries.read().unwrap();
            match entries.get(id) {
                None => return None,
                Some(entry) if entry.stored_at.elapsed() < self.ttl => {
                    return Some(entry.file.clone())
                }
                Some(_) => {}
            }
        }

        self.entries.write().unwrap().remove(id);
        None
    }

    /// Drop every expired entry, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        let mut entries = self.entries.write().unwrap();
        let before = entries.len();
        entries.retain(|_, entry| entry.stored_at.elapsed() < self.ttl);
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ResultStore {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
