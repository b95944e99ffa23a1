use thiserror::Error;

/// Error raised by a `Session` while opening or closing a transactional scope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("session lock poisoned during {0}")]
    LockPoisoned(&'static str),

    #[error("no transactional scope is open")]
    NoActiveScope,

    /// Scopes must be closed innermost first.
    #[error("scope mismatch: expected savepoint {expected}, got {actual}")]
    ScopeMismatch { expected: usize, actual: usize },
}

/// Error raised by a `Store` primitive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("record not found: {collection}:{id}")]
    NotFound { collection: String, id: String },

    #[error("record already exists: {collection}:{id}")]
    AlreadyExists { collection: String, id: String },

    #[error("record serialization error: {0}")]
    Serde(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serde(err.to_string())
    }
}
