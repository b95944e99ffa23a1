use bond_rust::{
    impl_model, HasAfterCreate, HasAfterDelete, HasAfterUpdate, HasBeforeCreate,
    HasBeforeDelete, HasBeforeUpdate, HasSave, HasStore, HasValidate, HookError, Model, Record,
    Session, Store,
};
use serde::{Deserialize, Serialize};

use super::tracker::Tracker;

/// No optional capabilities at all.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub body: String,
}

impl Note {
    pub fn new(id: &str, body: &str) -> Self {
        Self {
            id: id.into(),
            body: body.into(),
        }
    }
}

impl Record for Note {
    const COLLECTION: &'static str = "notes";
    fn id(&self) -> &str {
        &self.id
    }
}

impl_model!(Note);

/// Every hook except `save`, each reporting to a tracker.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(skip)]
    pub tracker: Tracker,
}

impl User {
    pub fn new(id: &str, email: &str, tracker: &Tracker) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            tracker: tracker.clone(),
        }
    }
}

impl Record for User {
    const COLLECTION: &'static str = "users";
    fn id(&self) -> &str {
        &self.id
    }
}

impl HasValidate for User {
    fn validate(&self) -> Result<(), HookError> {
        self.tracker.call("validate")?;
        if self.email.contains('@') {
            Ok(())
        } else {
            Err("invalid".into())
        }
    }
}

impl HasBeforeCreate for User {
    fn before_create(&mut self, _session: &dyn Session) -> Result<(), HookError> {
        self.tracker.call("before_create")?;
        self.email = self.email.to_lowercase();
        Ok(())
    }
}

impl HasAfterCreate for User {
    fn after_create(&mut self, _session: &dyn Session) -> Result<(), HookError> {
        Ok(self.tracker.call("after_create")?)
    }
}

impl HasBeforeUpdate for User {
    fn before_update(&mut self, _session: &dyn Session) -> Result<(), HookError> {
        Ok(self.tracker.call("before_update")?)
    }
}

impl HasAfterUpdate for User {
    fn after_update(&mut self, _session: &dyn Session) -> Result<(), HookError> {
        Ok(self.tracker.call("after_update")?)
    }
}

impl HasBeforeDelete for User {
    fn before_delete(&mut self, _session: &dyn Session) -> Result<(), HookError> {
        Ok(self.tracker.call("before_delete")?)
    }
}

impl HasAfterDelete for User {
    fn after_delete(&mut self, _session: &dyn Session) -> Result<(), HookError> {
        Ok(self.tracker.call("after_delete")?)
    }
}

impl_model!(
    User,
    [
        validate,
        before_create,
        after_create,
        before_update,
        after_update,
        before_delete,
        after_delete,
    ]
);

/// Audit entry written by [`Account`]'s custom save.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: String,
    pub action: String,
}

impl Record for AuditEntry {
    const COLLECTION: &'static str = "audit_log";
    fn id(&self) -> &str {
        &self.id
    }
}

/// Persists itself through a custom `save` that also writes an audit entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub balance: i64,
    #[serde(skip)]
    pub tracker: Tracker,
}

impl Account {
    pub fn new(id: &str, balance: i64, tracker: &Tracker) -> Self {
        Self {
            id: id.into(),
            balance,
            tracker: tracker.clone(),
        }
    }
}

impl Record for Account {
    const COLLECTION: &'static str = "accounts";
    fn id(&self) -> &str {
        &self.id
    }
}

impl HasSave for Account {
    fn save(&mut self, session: &dyn Session) -> Result<(), HookError> {
        let store = self.store(session);
        let action = if store.exists(&*self)? {
            store.update(&*self)?;
            "updated"
        } else {
            store.insert(&*self)?;
            "created"
        };

        let entry = AuditEntry {
            id: format!("{}:{}", self.id, self.balance),
            action: action.into(),
        };
        session.store(AuditEntry::COLLECTION).insert(&entry)?;

        Ok(self.tracker.call("save")?)
    }
}

impl HasValidate for Account {
    fn validate(&self) -> Result<(), HookError> {
        self.tracker.call("validate")?;
        if self.balance < 0 {
            return Err("balance cannot be negative".into());
        }
        Ok(())
    }
}

impl HasBeforeCreate for Account {
    fn before_create(&mut self, _session: &dyn Session) -> Result<(), HookError> {
        Ok(self.tracker.call("before_create")?)
    }
}

impl HasAfterCreate for Account {
    fn after_create(&mut self, _session: &dyn Session) -> Result<(), HookError> {
        Ok(self.tracker.call("after_create")?)
    }
}

impl_model!(Account, [save, validate, before_create, after_create]);

impl_model!(AuditEntry);

/// A custom `save` that writes nothing, so any stored record would have to
/// come from the default path.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Draft {
    pub id: String,
    #[serde(skip)]
    pub tracker: Tracker,
}

impl Record for Draft {
    const COLLECTION: &'static str = "drafts";
    fn id(&self) -> &str {
        &self.id
    }
}

impl HasSave for Draft {
    fn save(&mut self, _session: &dyn Session) -> Result<(), HookError> {
        Ok(self.tracker.call("save")?)
    }
}

impl_model!(Draft, [save]);

/// Capabilities differ per variant: only published posts are audited on delete.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Post {
    Unpublished { id: String },
    Published { id: String, audit_ok: bool },
}

impl Record for Post {
    const COLLECTION: &'static str = "posts";
    fn id(&self) -> &str {
        match self {
            Post::Unpublished { id } | Post::Published { id, .. } => id,
        }
    }
}

impl HasStore for Post {
    fn store<'s>(&self, session: &'s dyn Session) -> Box<dyn Store + 's> {
        session.store(Self::COLLECTION)
    }
}

impl HasAfterDelete for Post {
    fn after_delete(&mut self, _session: &dyn Session) -> Result<(), HookError> {
        match self {
            Post::Published {
                audit_ok: false, ..
            } => Err("audit failed".into()),
            _ => Ok(()),
        }
    }
}

impl Model for Post {
    fn as_after_delete(&mut self) -> Option<&mut dyn HasAfterDelete> {
        if matches!(self, Post::Published { .. }) {
            Some(self)
        } else {
            None
        }
    }
}
