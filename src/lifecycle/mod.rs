//! Lifecycle - Runs a model's hooks around a single create, update or delete.
//!
//! Order per operation: `validate` → `before_*` → mutation → `after_*`.
//! The first failure stops the sequence. A failing after hook also rolls
//! the mutation back through the session.
//!
//! ## Example
//!
//! ```ignore
//! use bond_rust::{create, delete, InMemoryDatabase};
//!
//! let db = InMemoryDatabase::new();
//! let session = db.session();
//!
//! create(&session, &mut user)?;
//! delete(&session, &mut user)?;
//! ```

mod dispatcher;
mod error;

use std::fmt;

use serde::Deserialize;

use crate::model::Model;
use crate::session::Session;

pub use dispatcher::Dispatcher;
pub use error::LifecycleError;

/// The mutation an operation performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The step of an operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Deciding between create and update in `save`.
    Resolve,
    Validate,
    BeforeHook,
    Mutation,
    AfterHook,
    /// Opening or committing the operation's scope.
    Transaction,
}

/// Dispatcher settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Run `validate` before deletes as well. Off by default.
    pub validate_on_delete: bool,
}

/// Create `model` with the default dispatcher.
pub fn create(session: &dyn Session, model: &mut dyn Model) -> Result<(), LifecycleError> {
    Dispatcher::default().create(session, model)
}

/// Update `model` with the default dispatcher.
pub fn update(session: &dyn Session, model: &mut dyn Model) -> Result<(), LifecycleError> {
    Dispatcher::default().update(session, model)
}

/// Delete `model` with the default dispatcher.
pub fn delete(session: &dyn Session, model: &mut dyn Model) -> Result<(), LifecycleError> {
    Dispatcher::default().delete(session, model)
}

/// Create or update `model` depending on whether it is already stored.
/// Returns the operation that ran.
pub fn save(session: &dyn Session, model: &mut dyn Model) -> Result<Operation, LifecycleError> {
    Dispatcher::default().save(session, model)
}
