//! Field-keyed validation failures.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Fields of the credential that can carry a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    CurrentSecret,
    Secret,
    SecretConfirmation,
}

impl Field {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CurrentSecret => "current_secret",
            Self::Secret => "secret",
            Self::SecretConfirmation => "secret_confirmation",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single recoverable credential failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("can't be blank")]
    MissingCurrentSecret,
    #[error("is invalid")]
    InvalidCurrentSecret,
    #[error("doesn't match")]
    ConfirmationMismatch,
    #[error("can't be blank")]
    MissingInitialSecret,
}

impl CredentialError {
    #[must_use]
    pub const fn field(self) -> Field {
        match self {
            Self::MissingCurrentSecret | Self::InvalidCurrentSecret => Field::CurrentSecret,
            Self::ConfirmationMismatch => Field::SecretConfirmation,
            Self::MissingInitialSecret => Field::Secret,
        }
    }
}

/// Ordered messages per field, e.g. `{"current_secret": ["is invalid"]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, Vec<String>>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: CredentialError) {
        self.0
            .entry(error.field())
            .or_default()
            .push(error.to_string());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Messages attached to `field`, in the order they were added.
    #[must_use]
    pub fn get(&self, field: Field) -> &[String] {
        self.0.get(&field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &[String])> {
        self.0.iter().map(|(field, messages)| (*field, messages.as_slice()))
    }
}

impl From<CredentialError> for FieldErrors {
    fn from(error: CredentialError) -> Self {
        let mut errors = Self::new();
        errors.add(error);
        errors
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in self.iter() {
            for message in messages {
                if !first {
                    f.write_str(", ")?;
                }
                write!(f, "{field} {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}
