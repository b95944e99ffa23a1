use tracing::{debug, debug_span, error, trace, warn};

use super::{DispatcherConfig, LifecycleError, Operation};
use crate::model::{HookError, Model};
use crate::session::{Session, Transaction};
use crate::store::Store;

/// Progress of one operation. Any state may fail; failure is terminal and
/// is reported as a [`LifecycleError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Validated,
    PreHooked,
    Mutated,
    Done,
}

impl State {
    fn advance(&mut self, next: State) {
        trace!(from = ?*self, to = ?next, "lifecycle transition");
        *self = next;
    }
}

/// Stateless hook orchestrator.
///
/// Holds only its configuration; every call probes the model afresh, so the
/// same dispatcher serves any mix of model types and values.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dispatcher {
    config: DispatcherConfig,
}

impl Dispatcher {
    pub fn new(config: DispatcherConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    pub fn create(
        &self,
        session: &dyn Session,
        model: &mut dyn Model,
    ) -> Result<(), LifecycleError> {
        self.dispatch(Operation::Create, session, model)
    }

    pub fn update(
        &self,
        session: &dyn Session,
        model: &mut dyn Model,
    ) -> Result<(), LifecycleError> {
        self.dispatch(Operation::Update, session, model)
    }

    pub fn delete(
        &self,
        session: &dyn Session,
        model: &mut dyn Model,
    ) -> Result<(), LifecycleError> {
        self.dispatch(Operation::Delete, session, model)
    }

    /// Update `model` if its id is already stored, create it otherwise.
    pub fn save(
        &self,
        session: &dyn Session,
        model: &mut dyn Model,
    ) -> Result<Operation, LifecycleError> {
        let exists = model
            .store(session)
            .exists(&*model)
            .map_err(LifecycleError::Resolve)?;
        let operation = if exists {
            Operation::Update
        } else {
            Operation::Create
        };
        self.dispatch(operation, session, model)?;
        Ok(operation)
    }

    fn validates(&self, operation: Operation) -> bool {
        match operation {
            Operation::Create | Operation::Update => true,
            Operation::Delete => self.config.validate_on_delete,
        }
    }

    fn dispatch(
        &self,
        operation: Operation,
        session: &dyn Session,
        model: &mut dyn Model,
    ) -> Result<(), LifecycleError> {
        let store = model.store(session);
        let span = debug_span!(
            "lifecycle",
            operation = operation.as_str(),
            collection = store.collection()
        );
        let _enter = span.enter();
        let mut state = State::Start;

        if self.validates(operation) {
            if let Some(validator) = model.as_validate() {
                validator.validate().map_err(LifecycleError::Validation)?;
            }
        }
        state.advance(State::Validated);

        before_hook(operation, model, session)
            .map_err(|error| LifecycleError::BeforeHook { operation, error })?;
        state.advance(State::PreHooked);

        // Dropping `tx` on an early return hands the rollback to the session.
        let tx = Transaction::begin(session)?;
        mutate(operation, model, store.as_ref(), session)
            .map_err(|error| LifecycleError::Mutation { operation, error })?;
        state.advance(State::Mutated);

        if let Err(error) = after_hook(operation, model, session) {
            warn!(error = %error, "after hook failed, rolling back");
            let rolled_back = match tx.rollback() {
                Ok(()) => true,
                Err(rollback_err) => {
                    error!(error = %rollback_err, "rollback after failed after hook failed");
                    false
                }
            };
            return Err(LifecycleError::AfterHook {
                operation,
                error,
                rolled_back,
            });
        }

        tx.commit()?;
        state.advance(State::Done);
        debug!("lifecycle complete");
        Ok(())
    }
}

fn before_hook(
    operation: Operation,
    model: &mut dyn Model,
    session: &dyn Session,
) -> Result<(), HookError> {
    match operation {
        Operation::Create => match model.as_before_create() {
            Some(hook) => hook.before_create(session),
            None => Ok(()),
        },
        Operation::Update => match model.as_before_update() {
            Some(hook) => hook.before_update(session),
            None => Ok(()),
        },
        Operation::Delete => match model.as_before_delete() {
            Some(hook) => hook.before_delete(session),
            None => Ok(()),
        },
    }
}

fn after_hook(
    operation: Operation,
    model: &mut dyn Model,
    session: &dyn Session,
) -> Result<(), HookError> {
    match operation {
        Operation::Create => match model.as_after_create() {
            Some(hook) => hook.after_create(session),
            None => Ok(()),
        },
        Operation::Update => match model.as_after_update() {
            Some(hook) => hook.after_update(session),
            None => Ok(()),
        },
        Operation::Delete => match model.as_after_delete() {
            Some(hook) => hook.after_delete(session),
            None => Ok(()),
        },
    }
}

fn mutate(
    operation: Operation,
    model: &mut dyn Model,
    store: &dyn Store,
    session: &dyn Session,
) -> Result<(), HookError> {
    if operation != Operation::Delete {
        if let Some(custom) = model.as_save() {
            trace!("delegating to custom save");
            return custom.save(session);
        }
    }

    match operation {
        Operation::Create => store.insert(&*model)?,
        Operation::Update => store.update(&*model)?,
        Operation::Delete => store.remove(&*model)?,
    }
    Ok(())
}
