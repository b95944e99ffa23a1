//! InMemorySession - Journaled session over an [`InMemoryDatabase`].
//!
//! Writes made while no scope is open are applied and kept. Writes inside a
//! scope record the value they replaced; rolling the scope back replays
//! those records newest first.

use std::sync::{Mutex, MutexGuard};

use tracing::trace;

use super::database::StoredRecord;
use super::{CollectionStore, InMemoryDatabase};
use crate::error::{SessionError, StoreError};
use crate::session::{Savepoint, Session};
use crate::store::Store;

struct UndoEntry {
    key: String,
    previous: Option<StoredRecord>,
}

#[derive(Default)]
struct Journal {
    entries: Vec<UndoEntry>,
    /// Journal length when each open scope began, outermost first.
    scopes: Vec<usize>,
}

impl Journal {
    /// Journal position where the innermost scope began, if `savepoint`
    /// names that scope.
    fn start_of(&self, savepoint: Savepoint) -> Result<usize, SessionError> {
        let depth = self.scopes.len();
        if depth == 0 {
            return Err(SessionError::NoActiveScope);
        }
        if savepoint.depth() != depth {
            return Err(SessionError::ScopeMismatch {
                expected: depth,
                actual: savepoint.depth(),
            });
        }
        self.scopes.last().copied().ok_or(SessionError::NoActiveScope)
    }
}

/// A session with nested, rollback-capable scopes.
pub struct InMemorySession {
    db: InMemoryDatabase,
    journal: Mutex<Journal>,
}

impl InMemorySession {
    pub fn new(db: InMemoryDatabase) -> Self {
        Self {
            db,
            journal: Mutex::new(Journal::default()),
        }
    }

    pub fn database(&self) -> &InMemoryDatabase {
        &self.db
    }

    /// Number of open scopes.
    pub fn depth(&self) -> Result<usize, SessionError> {
        Ok(self.lock("depth")?.scopes.len())
    }

    fn lock(&self, operation: &'static str) -> Result<MutexGuard<'_, Journal>, SessionError> {
        self.journal
            .lock()
            .map_err(|_| SessionError::LockPoisoned(operation))
    }

    fn record(journal: &mut Journal, key: String, previous: Option<StoredRecord>) {
        if !journal.scopes.is_empty() {
            journal.entries.push(UndoEntry { key, previous });
        }
    }

    pub(crate) fn insert(
        &self,
        collection: &str,
        id: &str,
        bytes: Vec<u8>,
    ) -> Result<(), StoreError> {
        let mut journal = self.lock("insert")?;
        let key = self.db.insert_raw(collection, id, bytes)?;
        Self::record(&mut journal, key, None);
        Ok(())
    }

    pub(crate) fn update(
        &self,
        collection: &str,
        id: &str,
        bytes: Vec<u8>,
    ) -> Result<(), StoreError> {
        let mut journal = self.lock("update")?;
        let (key, previous) = self.db.update_raw(collection, id, bytes)?;
        Self::record(&mut journal, key, Some(previous));
        Ok(())
    }

    pub(crate) fn remove(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let mut journal = self.lock("remove")?;
        let (key, previous) = self.db.remove_raw(collection, id)?;
        Self::record(&mut journal, key, Some(previous));
        Ok(())
    }
}

impl Session for InMemorySession {
    fn store(&self, collection: &str) -> Box<dyn Store + '_> {
        Box::new(CollectionStore::new(self, collection))
    }

    fn begin(&self) -> Result<Savepoint, SessionError> {
        let mut journal = self.lock("begin")?;
        let start = journal.entries.len();
        journal.scopes.push(start);
        Ok(Savepoint::new(journal.scopes.len()))
    }

    fn commit(&self, savepoint: Savepoint) -> Result<(), SessionError> {
        let mut journal = self.lock("commit")?;
        journal.start_of(savepoint)?;
        journal.scopes.pop();
        // Inner scopes hand their entries to the parent.
        if journal.scopes.is_empty() {
            journal.entries.clear();
        }
        Ok(())
    }

    fn rollback(&self, savepoint: Savepoint) -> Result<(), SessionError> {
        let mut journal = self.lock("rollback")?;
        let start = journal.start_of(savepoint)?;
        trace!(
            entries = journal.entries.len() - start,
            depth = savepoint.depth(),
            "undoing scope"
        );

        // The scope stays open until every entry is restored, so a failed
        // rollback can be retried.
        for entry in journal.entries[start..].iter().rev() {
            self.db
                .restore(&entry.key, entry.previous.clone())
                .map_err(|_| SessionError::LockPoisoned("rollback"))?;
        }
        journal.entries.truncate(start);
        journal.scopes.pop();
        Ok(())
    }
}
