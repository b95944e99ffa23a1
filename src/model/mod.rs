//! Models - Application records with an optional lifecycle.
//!
//! A model knows where it persists itself ([`HasStore`]) and may opt into any
//! subset of the hook capabilities. Capabilities are advertised through probe
//! methods on [`Model`] that default to `None`.
//!
//! ## Example
//!
//! ```ignore
//! use bond_rust::{impl_model, HasValidate, HookError, Record};
//!
//! #[derive(Serialize, Deserialize, Clone)]
//! struct User {
//!     pub id: String,
//!     pub email: String,
//! }
//!
//! impl Record for User {
//!     const COLLECTION: &'static str = "users";
//!     fn id(&self) -> &str { &self.id }
//! }
//!
//! impl HasValidate for User {
//!     fn validate(&self) -> Result<(), HookError> {
//!         if self.email.contains('@') { Ok(()) } else { Err("invalid".into()) }
//!     }
//! }
//!
//! impl_model!(User, [validate]);
//!
//! bond_rust::create(&session, &mut user)?;
//! ```

mod capabilities;
mod macros;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::StoreError;
use crate::session::Session;
use crate::store::Store;

pub use capabilities::{
    HasAfterCreate, HasAfterDelete, HasAfterUpdate, HasBeforeCreate, HasBeforeDelete,
    HasBeforeUpdate, HasSave, HasValidate, HookError,
};

/// Typed record stored under a named collection.
pub trait Record: Serialize + DeserializeOwned {
    /// The collection name for this record type (e.g., "users", "posts").
    /// Maps to a table in SQL, a collection in MongoDB, a key prefix in KV stores, etc.
    const COLLECTION: &'static str;

    /// Returns the unique identifier for this record.
    fn id(&self) -> &str;
}

/// A versioned wrapper around record data.
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    pub data: T,
    pub version: u64,
}

/// What a `Store` needs from a model to write it.
pub trait Document {
    fn document_id(&self) -> String;

    fn to_document(&self) -> Result<Vec<u8>, StoreError>;
}

impl<R: Record> Document for R {
    fn document_id(&self) -> String {
        self.id().to_string()
    }

    fn to_document(&self) -> Result<Vec<u8>, StoreError> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// Mandatory capability: resolve the persistence target within a session.
pub trait HasStore {
    fn store<'s>(&self, session: &'s dyn Session) -> Box<dyn Store + 's>;
}

/// A persistable value with optional lifecycle hooks.
///
/// Override a probe to advertise a capability; the dispatcher calls the
/// probe at every stage, so a polymorphic type may answer differently per
/// value. [`impl_model!`](crate::impl_model) writes the overrides.
pub trait Model: HasStore + Document {
    fn as_save(&mut self) -> Option<&mut dyn HasSave> {
        None
    }

    fn as_validate(&self) -> Option<&dyn HasValidate> {
        None
    }

    fn as_before_create(&mut self) -> Option<&mut dyn HasBeforeCreate> {
        None
    }

    fn as_after_create(&mut self) -> Option<&mut dyn HasAfterCreate> {
        None
    }

    fn as_before_update(&mut self) -> Option<&mut dyn HasBeforeUpdate> {
        None
    }

    fn as_after_update(&mut self) -> Option<&mut dyn HasAfterUpdate> {
        None
    }

    fn as_before_delete(&mut self) -> Option<&mut dyn HasBeforeDelete> {
        None
    }

    fn as_after_delete(&mut self) -> Option<&mut dyn HasAfterDelete> {
        None
    }
}
