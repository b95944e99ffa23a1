//! In-memory storage backend.
//!
//! A reference `Session`/`Store` pair for tests and development. Records are
//! kept as JSON bytes keyed by `"COLLECTION:id"`, each with a version.
//!
//! ## Example
//!
//! ```ignore
//! use bond_rust::{create, InMemoryDatabase};
//!
//! let db = InMemoryDatabase::new();
//! let session = db.session();
//! create(&session, &mut user)?;
//!
//! let stored = db.get::<User>("user-1")?;
//! assert_eq!(db.stats().inserts, 1);
//! ```

mod database;
mod session;
mod store;

pub use database::{InMemoryDatabase, MutationStats};
pub use session::InMemorySession;
pub use store::CollectionStore;
