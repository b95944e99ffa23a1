//! Optional hook capabilities a model may opt into.
//!
//! Each capability is a single-method trait. A model advertises the ones it
//! implements through the probe methods on [`Model`](super::Model); the
//! lifecycle dispatcher asks again on every call.

use crate::session::Session;

/// Error returned by a hook. Handed back to the caller untouched.
pub type HookError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Custom persistence. When present, create and update delegate the write
/// entirely to `save` and the default store path is never used.
pub trait HasSave {
    fn save(&mut self, session: &dyn Session) -> Result<(), HookError>;
}

/// Called before create and update. An error aborts the operation before
/// anything is written.
pub trait HasValidate {
    fn validate(&self) -> Result<(), HookError>;
}

/// Called before the record is inserted. An error aborts the create.
pub trait HasBeforeCreate {
    fn before_create(&mut self, session: &dyn Session) -> Result<(), HookError>;
}

/// Called after the record is inserted. An error rolls the insert back.
pub trait HasAfterCreate {
    fn after_create(&mut self, session: &dyn Session) -> Result<(), HookError>;
}

/// Called before the record is updated. An error aborts the update.
pub trait HasBeforeUpdate {
    fn before_update(&mut self, session: &dyn Session) -> Result<(), HookError>;
}

/// Called after the record is updated. An error rolls the update back.
pub trait HasAfterUpdate {
    fn after_update(&mut self, session: &dyn Session) -> Result<(), HookError>;
}

/// Called before the record is removed. An error aborts the delete.
pub trait HasBeforeDelete {
    fn before_delete(&mut self, session: &dyn Session) -> Result<(), HookError>;
}

/// Called after the record is removed. An error restores the record.
pub trait HasAfterDelete {
    fn after_delete(&mut self, session: &dyn Session) -> Result<(), HookError>;
}
