//! In-memory credential state: the persisted digest plus transient secrets.

use super::digest::{DigestEngine, DigestError};
use secrecy::{ExposeSecret, SecretString};

/// Hook run immediately before a record is written to storage.
pub trait BeforeSave {
    /// # Errors
    /// Returns [`DigestError`] when a new digest cannot be computed.
    fn before_save(&mut self, digest: &DigestEngine) -> Result<(), DigestError>;
}

/// Credential fields of a holder.
///
/// Only `stored_digest` is ever persisted. The transient secrets are wiped by
/// [`Credential::clear_transient`] at the end of every save attempt.
#[derive(Debug, Clone, Default)]
pub struct Credential {
    stored_digest: String,
    new_secret: Option<SecretString>,
    secret_confirmation: Option<SecretString>,
    current_secret: Option<SecretString>,
}

impl Credential {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a credential from its persisted digest.
    #[must_use]
    pub fn from_stored(stored_digest: impl Into<String>) -> Self {
        Self {
            stored_digest: stored_digest.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn stored_digest(&self) -> &str {
        &self.stored_digest
    }

    pub(crate) fn restore_digest(&mut self, stored_digest: String) {
        self.stored_digest = stored_digest;
    }

    #[must_use]
    pub fn has_stored_digest(&self) -> bool {
        !self.stored_digest.is_empty()
    }

    pub fn set_new_secret(&mut self, plaintext: impl Into<SecretString>) {
        self.new_secret = Some(plaintext.into());
    }

    pub fn set_secret_confirmation(&mut self, plaintext: impl Into<SecretString>) {
        self.secret_confirmation = Some(plaintext.into());
    }

    pub fn set_current_secret(&mut self, plaintext: impl Into<SecretString>) {
        self.current_secret = Some(plaintext.into());
    }

    /// Candidate secret, `None` when absent or empty.
    #[must_use]
    pub fn new_secret(&self) -> Option<&SecretString> {
        filled(self.new_secret.as_ref())
    }

    #[must_use]
    pub fn secret_confirmation(&self) -> Option<&SecretString> {
        filled(self.secret_confirmation.as_ref())
    }

    #[must_use]
    pub fn current_secret(&self) -> Option<&SecretString> {
        filled(self.current_secret.as_ref())
    }

    #[must_use]
    pub fn has_transient_secrets(&self) -> bool {
        self.new_secret.is_some()
            || self.secret_confirmation.is_some()
            || self.current_secret.is_some()
    }

    /// Drop every transient secret. Dropping a `SecretString` zeroizes it.
    pub fn clear_transient(&mut self) {
        self.new_secret = None;
        self.secret_confirmation = None;
        self.current_secret = None;
    }

    /// Verify `plaintext` against the stored digest.
    #[must_use]
    pub fn matches_secret(&self, digest: &DigestEngine, plaintext: &str) -> bool {
        self.has_stored_digest() && digest.verify(plaintext, &self.stored_digest)
    }
}

impl BeforeSave for Credential {
    fn before_save(&mut self, digest: &DigestEngine) -> Result<(), DigestError> {
        if let Some(secret) = self.new_secret() {
            let stored_digest = digest.hash(secret.expose_secret())?;
            self.stored_digest = stored_digest;
        }
        Ok(())
    }
}

fn filled(secret: Option<&SecretString>) -> Option<&SecretString> {
    secret.filter(|secret| !secret.expose_secret().is_empty())
}
