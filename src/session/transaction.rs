//! Transaction - Scoped guard over a session savepoint.
//!
//! The guard commits only when asked to. Every other exit path (early
//! return, `?`, panic unwinding) rolls the scope back in `Drop`.

use tracing::{debug, error, warn};

use super::{Savepoint, Session};
use crate::error::SessionError;

/// An open transactional scope inside a caller-owned session.
pub struct Transaction<'s> {
    session: &'s dyn Session,
    savepoint: Option<Savepoint>,
}

impl<'s> Transaction<'s> {
    /// Open a new scope in `session`.
    pub fn begin(session: &'s dyn Session) -> Result<Self, SessionError> {
        let savepoint = session.begin()?;
        debug!(depth = savepoint.depth(), "transaction scope opened");
        Ok(Self {
            session,
            savepoint: Some(savepoint),
        })
    }

    /// The session this scope belongs to.
    pub fn session(&self) -> &'s dyn Session {
        self.session
    }

    /// Check if the scope is still open (not committed or rolled back).
    pub fn is_active(&self) -> bool {
        self.savepoint.is_some()
    }

    /// Commit the scope. A failed commit rolls the scope back before the
    /// commit error is returned.
    pub fn commit(mut self) -> Result<(), SessionError> {
        let savepoint = self.savepoint.take().ok_or(SessionError::NoActiveScope)?;
        if let Err(err) = self.session.commit(savepoint) {
            warn!(depth = savepoint.depth(), error = %err, "commit failed, rolling back");
            if let Err(rollback_err) = self.session.rollback(savepoint) {
                error!(
                    depth = savepoint.depth(),
                    error = %rollback_err,
                    "rollback after failed commit failed"
                );
            }
            return Err(err);
        }
        debug!(depth = savepoint.depth(), "transaction scope committed");
        Ok(())
    }

    /// Roll the scope back.
    pub fn rollback(mut self) -> Result<(), SessionError> {
        let savepoint = self.savepoint.take().ok_or(SessionError::NoActiveScope)?;
        self.session.rollback(savepoint)?;
        debug!(depth = savepoint.depth(), "transaction scope rolled back");
        Ok(())
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if let Some(savepoint) = self.savepoint.take() {
            warn!(
                depth = savepoint.depth(),
                "transaction scope dropped without commit, rolling back"
            );
            if let Err(err) = self.session.rollback(savepoint) {
                error!(depth = savepoint.depth(), error = %err, "scope rollback failed");
            }
        }
    }
}

/// Run `f` inside one transactional scope of `session`.
///
/// Commits when `f` returns `Ok`, rolls back when it returns `Err`. Use it to
/// make several lifecycle operations succeed or fail together.
pub fn in_transaction<T, E, F>(session: &dyn Session, f: F) -> Result<T, E>
where
    F: FnOnce(&dyn Session) -> Result<T, E>,
    E: From<SessionError>,
{
    let tx = Transaction::begin(session)?;
    match f(session) {
        Ok(value) => {
            tx.commit()?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback() {
                error!(error = %rollback_err, "rollback after failed transaction body failed");
            }
            Err(err)
        }
    }
}
