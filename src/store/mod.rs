//! Store - Persistence target for one collection under one session.
//!
//! Produced fresh per operation by [`HasStore::store`](crate::HasStore::store).
//! The lifecycle dispatcher only calls these primitives on the default
//! mutation path; a model with `HasSave` writes through the store itself.

use crate::error::StoreError;
use crate::model::Model;

/// CRUD primitives the default mutation path invokes.
///
/// Implementations read the record through the model's
/// [`Document`](crate::Document) view and write within the session the store
/// was resolved from, so writes join whatever scope the session has open.
pub trait Store {
    /// The collection this store writes to.
    fn collection(&self) -> &str;

    /// Insert a new record. Fails if it already exists.
    fn insert(&self, item: &dyn Model) -> Result<(), StoreError>;

    /// Replace an existing record. Fails if it does not exist.
    fn update(&self, item: &dyn Model) -> Result<(), StoreError>;

    /// Remove an existing record. Fails if it does not exist.
    fn remove(&self, item: &dyn Model) -> Result<(), StoreError>;

    /// Check whether a record with the item's id is stored.
    fn exists(&self, item: &dyn Model) -> Result<bool, StoreError>;
}
