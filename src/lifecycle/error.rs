use thiserror::Error;

use super::{Operation, Stage};
use crate::error::{SessionError, StoreError};
use crate::model::HookError;

/// Why a lifecycle operation failed.
///
/// Hook and mutation failures display the underlying error's message as is,
/// so a validator returning `"invalid"` surfaces as `"invalid"`. Match on the
/// variant (or call [`stage`](Self::stage)) to learn which step failed.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// `validate` failed; nothing was written.
    #[error("{0}")]
    Validation(HookError),

    /// A before hook failed; nothing was written.
    #[error("{error}")]
    BeforeHook {
        operation: Operation,
        error: HookError,
    },

    /// The default store write or the model's custom `save` failed. Any
    /// partial effect was undone by the session scope.
    #[error("{error}")]
    Mutation {
        operation: Operation,
        error: HookError,
    },

    /// An after hook failed once the mutation had been performed. The
    /// mutation was rolled back if `rolled_back` is true.
    #[error("{error}")]
    AfterHook {
        operation: Operation,
        error: HookError,
        rolled_back: bool,
    },

    /// `save` could not tell whether the record already exists.
    #[error("{0}")]
    Resolve(StoreError),

    /// The session failed to open or commit the operation's scope.
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl LifecycleError {
    /// The stage that failed.
    pub fn stage(&self) -> Stage {
        match self {
            LifecycleError::Validation(_) => Stage::Validate,
            LifecycleError::BeforeHook { .. } => Stage::BeforeHook,
            LifecycleError::Mutation { .. } => Stage::Mutation,
            LifecycleError::AfterHook { .. } => Stage::AfterHook,
            LifecycleError::Resolve(_) => Stage::Resolve,
            LifecycleError::Session(_) => Stage::Transaction,
        }
    }

    /// The operation that failed, when known.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            LifecycleError::BeforeHook { operation, .. }
            | LifecycleError::Mutation { operation, .. }
            | LifecycleError::AfterHook { operation, .. } => Some(*operation),
            _ => None,
        }
    }

    /// Whether the failure happened after the mutation and so required it to
    /// be undone.
    pub fn rollback_required(&self) -> bool {
        matches!(self, LifecycleError::AfterHook { .. })
    }

    /// Whether the mutation was actually rolled back after an after-hook
    /// failure.
    pub fn rolled_back(&self) -> bool {
        matches!(
            self,
            LifecycleError::AfterHook {
                rolled_back: true,
                ..
            }
        )
    }

    /// The error returned by the hook, `save`, or store primitive that
    /// stopped the operation.
    pub fn hook_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            LifecycleError::Validation(error)
            | LifecycleError::BeforeHook { error, .. }
            | LifecycleError::Mutation { error, .. }
            | LifecycleError::AfterHook { error, .. } => Some(&**error),
            _ => None,
        }
    }

    /// Unwrap into the underlying error.
    pub fn into_inner(self) -> HookError {
        match self {
            LifecycleError::Validation(error)
            | LifecycleError::BeforeHook { error, .. }
            | LifecycleError::Mutation { error, .. }
            | LifecycleError::AfterHook { error, .. } => error,
            LifecycleError::Resolve(err) => Box::new(err),
            LifecycleError::Session(err) => Box::new(err),
        }
    }
}
