use super::InMemorySession;
use crate::error::StoreError;
use crate::model::Model;
use crate::store::Store;

/// One collection of an [`InMemorySession`].
pub struct CollectionStore<'s> {
    session: &'s InMemorySession,
    collection: String,
}

impl<'s> CollectionStore<'s> {
    pub fn new(session: &'s InMemorySession, collection: impl Into<String>) -> Self {
        Self {
            session,
            collection: collection.into(),
        }
    }
}

impl Store for CollectionStore<'_> {
    fn collection(&self) -> &str {
        &self.collection
    }

    fn insert(&self, item: &dyn Model) -> Result<(), StoreError> {
        let bytes = item.to_document()?;
        self.session
            .insert(&self.collection, &item.document_id(), bytes)
    }

    fn update(&self, item: &dyn Model) -> Result<(), StoreError> {
        let bytes = item.to_document()?;
        self.session
            .update(&self.collection, &item.document_id(), bytes)
    }

    fn remove(&self, item: &dyn Model) -> Result<(), StoreError> {
        self.session.remove(&self.collection, &item.document_id())
    }

    fn exists(&self, item: &dyn Model) -> Result<bool, StoreError> {
        self.session
            .database()
            .contains(&self.collection, &item.document_id())
    }
}
