mod error;
mod lifecycle;
#[cfg(feature = "memory")]
mod memory;
mod model;
mod session;
mod store;

pub use error::{SessionError, StoreError};
pub use lifecycle::{
    create, delete, save, update, Dispatcher, DispatcherConfig, LifecycleError, Operation, Stage,
};
#[cfg(feature = "memory")]
pub use memory::{CollectionStore, InMemoryDatabase, InMemorySession, MutationStats};
pub use model::{
    Document, HasAfterCreate, HasAfterDelete, HasAfterUpdate, HasBeforeCreate, HasBeforeDelete,
    HasBeforeUpdate, HasSave, HasStore, HasValidate, HookError, Model, Record, Versioned,
};
pub use session::{in_transaction, Savepoint, Session, Transaction};
pub use store::Store;
