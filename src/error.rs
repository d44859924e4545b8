use crate::credential::{DigestError, FieldErrors};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
    #[error("validation failed: {0}")]
    Invalid(FieldErrors),
    #[error("account not found: {0}")]
    NotFound(Uuid),
    #[error(transparent)]
    Digest(#[from] DigestError),
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl Error {
    /// Field errors when the attempt was rejected by validation.
    #[must_use]
    pub const fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<FieldErrors> for Error {
    fn from(errors: FieldErrors) -> Self {
        Self::Invalid(errors)
    }
}
