//! InMemoryDatabase - HashMap-backed record storage for testing and development.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use super::InMemorySession;
use crate::error::StoreError;
use crate::model::{Record, Versioned};

/// Internal stored representation of a record.
#[derive(Debug, Clone)]
pub(crate) struct StoredRecord {
    bytes: Vec<u8>,
    version: u64,
}

/// Counts of store primitives that reached the database.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MutationStats {
    pub inserts: u64,
    pub updates: u64,
    pub removes: u64,
    /// Journal entries undone by scope rollbacks.
    pub rollbacks: u64,
}

#[derive(Default)]
struct Counters {
    inserts: AtomicU64,
    updates: AtomicU64,
    removes: AtomicU64,
    rollbacks: AtomicU64,
}

/// In-memory database backed by a HashMap.
///
/// Storage key is `"COLLECTION:id"`. Clone-friendly via Arc; every clone and
/// every session opened from it see the same records.
#[derive(Clone)]
pub struct InMemoryDatabase {
    storage: Arc<RwLock<HashMap<String, StoredRecord>>>,
    counters: Arc<Counters>,
}

impl Default for InMemoryDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDatabase {
    /// Create a new empty database.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
            counters: Arc::new(Counters::default()),
        }
    }

    /// Open a session over this database.
    pub fn session(&self) -> InMemorySession {
        InMemorySession::new(self.clone())
    }

    pub(crate) fn make_key(collection: &str, id: &str) -> String {
        format!("{}:{}", collection, id)
    }

    /// Get a record by ID. Returns None if not found.
    pub fn get<R: Record>(&self, id: &str) -> Result<Option<Versioned<R>>, StoreError> {
        let key = Self::make_key(R::COLLECTION, id);
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))?;

        match storage.get(&key) {
            Some(stored) => {
                let data: R = serde_json::from_slice(&stored.bytes)?;
                Ok(Some(Versioned {
                    data,
                    version: stored.version,
                }))
            }
            None => Ok(None),
        }
    }

    /// Find records of one collection matching a predicate.
    pub fn find<R: Record>(
        &self,
        predicate: &dyn Fn(&R) -> bool,
    ) -> Result<Vec<Versioned<R>>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))?;

        let prefix = format!("{}:", R::COLLECTION);
        let mut results = Vec::new();

        for (key, stored) in storage.iter() {
            if key.starts_with(&prefix) {
                let data: R = serde_json::from_slice(&stored.bytes)?;
                if predicate(&data) {
                    results.push(Versioned {
                        data,
                        version: stored.version,
                    });
                }
            }
        }

        Ok(results)
    }

    /// Check whether a record is stored.
    pub fn contains(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))?;
        Ok(storage.contains_key(&Self::make_key(collection, id)))
    }

    /// Number of records across all collections.
    pub fn len(&self) -> Result<usize, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))?;
        Ok(storage.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Snapshot of the mutation counters.
    pub fn stats(&self) -> MutationStats {
        MutationStats {
            inserts: self.counters.inserts.load(Ordering::Relaxed),
            updates: self.counters.updates.load(Ordering::Relaxed),
            removes: self.counters.removes.load(Ordering::Relaxed),
            rollbacks: self.counters.rollbacks.load(Ordering::Relaxed),
        }
    }

    /// Insert a new record. Fails if it already exists.
    pub(crate) fn insert_raw(
        &self,
        collection: &str,
        id: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StoreError> {
        let key = Self::make_key(collection, id);
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))?;

        if storage.contains_key(&key) {
            return Err(StoreError::AlreadyExists {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }

        storage.insert(key.clone(), StoredRecord { bytes, version: 1 });
        self.counters.inserts.fetch_add(1, Ordering::Relaxed);
        Ok(key)
    }

    /// Replace an existing record, bumping its version. Returns the key and
    /// the previous value.
    pub(crate) fn update_raw(
        &self,
        collection: &str,
        id: &str,
        bytes: Vec<u8>,
    ) -> Result<(String, StoredRecord), StoreError> {
        let key = Self::make_key(collection, id);
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))?;

        let previous = storage
            .get(&key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;

        storage.insert(
            key.clone(),
            StoredRecord {
                bytes,
                version: previous.version + 1,
            },
        );
        self.counters.updates.fetch_add(1, Ordering::Relaxed);
        Ok((key, previous))
    }

    /// Remove an existing record. Returns the key and the removed value.
    pub(crate) fn remove_raw(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<(String, StoredRecord), StoreError> {
        let key = Self::make_key(collection, id);
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))?;

        let previous = storage.remove(&key).ok_or_else(|| StoreError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        })?;
        self.counters.removes.fetch_add(1, Ordering::Relaxed);
        Ok((key, previous))
    }

    /// Put a key back to a journaled value (`None` = absent).
    pub(crate) fn restore(
        &self,
        key: &str,
        previous: Option<StoredRecord>,
    ) -> Result<(), StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))?;

        match previous {
            Some(stored) => {
                storage.insert(key.to_string(), stored);
            }
            None => {
                storage.remove(key);
            }
        }
        self.counters.rollbacks.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

#[cfg(test)]
impl InMemoryDatabase {
    pub(crate) fn get_raw(&self, collection: &str, id: &str) -> Option<Vec<u8>> {
        let storage = self.storage.read().ok()?;
        storage
            .get(&Self::make_key(collection, id))
            .map(|stored| stored.bytes.clone())
    }

    /// Poison the storage lock by panicking while holding it.
    pub(crate) fn poison(&self) {
        let storage = Arc::clone(&self.storage);
        let _ = std::thread::spawn(move || {
            let _guard = storage.write().unwrap();
            panic!("poisoning storage lock");
        })
        .join();
    }

    pub(crate) fn clear_poison(&self) {
        self.storage.clear_poison();
    }
}
