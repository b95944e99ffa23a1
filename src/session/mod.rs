//! Session - The caller-owned execution context every hook runs in.
//!
//! A session resolves stores for collections and offers nested
//! transactional scopes. The lifecycle dispatcher opens one scope per
//! operation and closes it before returning; it never creates or closes the
//! session itself.

mod transaction;

use crate::error::SessionError;
use crate::store::Store;

pub use transaction::{in_transaction, Transaction};

/// Marker for an open transactional scope, returned by [`Session::begin`].
///
/// `depth` is the number of scopes open once this one began (outermost = 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Savepoint {
    depth: usize,
}

impl Savepoint {
    pub fn new(depth: usize) -> Self {
        Self { depth }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// Execution context shared by all hook calls of one operation.
///
/// Methods take `&self`; implementations hold their transactional state
/// behind interior mutability. A session is not expected to serve several
/// in-flight operations at once.
pub trait Session {
    /// Resolve the store for a named collection.
    fn store(&self, collection: &str) -> Box<dyn Store + '_>;

    /// Open a (possibly nested) transactional scope.
    fn begin(&self) -> Result<Savepoint, SessionError>;

    /// Make every write since `savepoint` part of the enclosing scope, or
    /// durable if it is the outermost one.
    fn commit(&self, savepoint: Savepoint) -> Result<(), SessionError>;

    /// Undo every write since `savepoint`.
    fn rollback(&self, savepoint: Savepoint) -> Result<(), SessionError>;
}
