use std::sync::{Arc, Mutex};

/// Shared log of hook calls, cloned into every fixture that should report to it.
#[derive(Debug, Clone, Default)]
pub struct Tracker {
    calls: Arc<Mutex<Vec<String>>>,
    fail_on: Arc<Mutex<Option<(String, String)>>>,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the named hook return `message` as its error.
    pub fn fail_on(&self, hook: &str, message: &str) {
        *self.fail_on.lock().unwrap() = Some((hook.to_string(), message.to_string()));
    }

    pub fn clear_failure(&self) {
        *self.fail_on.lock().unwrap() = None;
    }

    /// Record a call, returning the configured failure if this hook should fail.
    pub fn call(&self, hook: &str) -> Result<(), String> {
        self.calls.lock().unwrap().push(hook.to_string());
        match &*self.fail_on.lock().unwrap() {
            Some((name, message)) if name == hook => Err(message.clone()),
            _ => Ok(()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }
}
