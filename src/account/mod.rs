//! The account record that owns a credential.
//!
//! `email` stands in for the non-secret attributes owned by the surrounding
//! system. Their own validation lives outside this crate; here they only need
//! to be assigned, saved and rolled back together with the credential.

pub mod changes;

pub use changes::{AccountChanges, SecretPair, UpdateWithSecret};

use crate::credential::{BeforeSave, Credential, DigestEngine, DigestError};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Account {
    id: Uuid,
    email: String,
    credential: Credential,
    persisted: bool,
}

/// Last persisted values, used to revert a rejected attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Snapshot {
    email: String,
    stored_digest: String,
}

/// Public view of an account; never carries secret material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountView {
    pub id: Uuid,
    pub email: String,
    pub has_secret: bool,
}

impl Account {
    /// A holder that has never been saved.
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            credential: Credential::new(),
            persisted: false,
        }
    }

    /// A holder loaded from storage.
    #[must_use]
    pub fn from_storage(
        id: Uuid,
        email: impl Into<String>,
        stored_digest: impl Into<String>,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            credential: Credential::from_stored(stored_digest),
            persisted: true,
        }
    }

    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    #[must_use]
    pub const fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn credential_mut(&mut self) -> &mut Credential {
        &mut self.credential
    }

    #[must_use]
    pub const fn is_new_record(&self) -> bool {
        !self.persisted
    }

    pub(crate) fn mark_persisted(&mut self) {
        self.persisted = true;
    }

    pub(crate) fn snapshot(&self) -> Snapshot {
        Snapshot {
            email: self.email.clone(),
            stored_digest: self.credential.stored_digest().to_string(),
        }
    }

    pub(crate) fn restore(&mut self, snapshot: Snapshot) {
        self.email = snapshot.email;
        self.credential.restore_digest(snapshot.stored_digest);
    }

    #[must_use]
    pub fn view(&self) -> AccountView {
        AccountView {
            id: self.id,
            email: self.email.clone(),
            has_secret: self.credential.has_stored_digest(),
        }
    }
}

impl BeforeSave for Account {
    fn before_save(&mut self, digest: &DigestEngine) -> Result<(), DigestError> {
        self.credential.before_save(digest)
    }
}
