//! Incoming attribute sets.
//!
//! Secret fields deserialize straight into [`SecretString`], so request bodies
//! never keep plaintext in an ordinary `String` longer than parsing takes.

use super::Account;
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};

/// Non-secret attributes a holder may change about themselves.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountChanges {
    #[serde(default)]
    pub email: Option<String>,
}

impl AccountChanges {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.email.is_none()
    }

    pub(crate) fn apply(self, account: &mut Account) {
        if let Some(email) = self.email {
            account.set_email(email);
        }
    }
}

/// A new secret and its confirmation.
#[derive(Debug, Default, Deserialize)]
pub struct SecretPair {
    #[serde(default, deserialize_with = "secret")]
    pub secret: Option<SecretString>,
    #[serde(default, deserialize_with = "secret")]
    pub secret_confirmation: Option<SecretString>,
}

impl SecretPair {
    #[must_use]
    pub fn new(secret: &str, confirmation: &str) -> Self {
        Self {
            secret: Some(SecretString::from(secret)),
            secret_confirmation: Some(SecretString::from(confirmation)),
        }
    }

    /// Set the pair as the transient secret fields of `account`.
    pub fn assign(self, account: &mut Account) {
        let credential = account.credential_mut();
        if let Some(secret) = self.secret {
            credential.set_new_secret(secret);
        }
        if let Some(confirmation) = self.secret_confirmation {
            credential.set_secret_confirmation(confirmation);
        }
    }
}

/// Everything a guarded self-service update may carry.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateWithSecret {
    #[serde(default, deserialize_with = "secret")]
    pub current_secret: Option<SecretString>,
    #[serde(flatten)]
    pub secrets: SecretPair,
    #[serde(flatten)]
    pub changes: AccountChanges,
}

impl UpdateWithSecret {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_current_secret(mut self, current: &str) -> Self {
        self.current_secret = Some(SecretString::from(current));
        self
    }

    #[must_use]
    pub fn with_secret(mut self, secret: &str, confirmation: &str) -> Self {
        self.secrets = SecretPair::new(secret, confirmation);
        self
    }

    #[must_use]
    pub fn with_email(mut self, email: &str) -> Self {
        self.changes.email = Some(email.to_string());
        self
    }
}

fn secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.map(SecretString::from))
}
