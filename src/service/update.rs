//! Guarded self-service updates.
//!
//! Every call must prove the current secret before anything is assigned, even
//! when only non-secret attributes change. A call ends in exactly one of:
//!
//! - `rejected`: the current secret was blank or wrong, nothing was assigned;
//! - `validation_failed`: assigned values failed validation and were reverted;
//! - `persisted`: the new state was saved;
//! - `faulted`: a collaborator failed after assignment and values were reverted.
//!
//! Transient secrets are wiped in all four cases.

use super::Credentials;
use crate::{
    account::{Account, UpdateWithSecret},
    credential::CredentialError,
    error::Error,
    store::AccountStore,
};
use secrecy::ExposeSecret;
use tracing::{field, info, instrument, Span};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Rejected,
    ValidationFailed,
    Persisted,
    Faulted,
}

impl Outcome {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rejected => "rejected",
            Self::ValidationFailed => "validation_failed",
            Self::Persisted => "persisted",
            Self::Faulted => "faulted",
        }
    }

    fn of_save(result: &Result<(), Error>) -> Self {
        match result {
            Ok(()) => Self::Persisted,
            Err(Error::Invalid(_)) => Self::ValidationFailed,
            Err(_) => Self::Faulted,
        }
    }
}

impl<S: AccountStore> Credentials<S> {
    /// Load holder `id` and apply `attrs` behind a current-secret check.
    ///
    /// # Errors
    /// [`Error::NotFound`] for an unknown holder, otherwise as
    /// [`Credentials::apply_update`].
    #[instrument(skip(self, attrs))]
    pub async fn update_with_secret(
        &self,
        id: Uuid,
        attrs: UpdateWithSecret,
    ) -> Result<Account, Error> {
        let mut account = self.load(id).await?;
        self.apply_update(&mut account, attrs).await?;
        Ok(account)
    }

    /// Apply `attrs` to an already loaded holder behind a current-secret check.
    ///
    /// On any failure the holder's non-secret attributes and digest are back
    /// at their last persisted values, and no transient secret remains.
    ///
    /// # Errors
    /// [`Error::Invalid`] carrying `current_secret` errors when the check
    /// fails, or the validation errors of the save. Collaborator faults are
    /// propagated as [`Error::Digest`] or [`Error::Store`].
    #[instrument(skip_all, fields(account_id = %account.id(), outcome = field::Empty))]
    pub async fn apply_update(
        &self,
        account: &mut Account,
        attrs: UpdateWithSecret,
    ) -> Result<(), Error> {
        let UpdateWithSecret {
            current_secret,
            secrets,
            changes,
        } = attrs;

        if let Some(current) = current_secret {
            account.credential_mut().set_current_secret(current);
        }

        let (outcome, result) = match self.check_current_secret(account) {
            Err(error) => (Outcome::Rejected, Err(Error::Invalid(error.into()))),
            Ok(()) => {
                let snapshot = account.snapshot();
                changes.apply(account);
                secrets.assign(account);

                let result = self.persist(account).await;
                if result.is_err() {
                    account.restore(snapshot);
                }
                (Outcome::of_save(&result), result)
            }
        };

        account.credential_mut().clear_transient();

        Span::current().record("outcome", outcome.as_str());
        info!(outcome = outcome.as_str(), "guarded update finished");

        result
    }

    fn check_current_secret(&self, account: &Account) -> Result<(), CredentialError> {
        let credential = account.credential();
        let Some(current) = credential.current_secret() else {
            return Err(CredentialError::MissingCurrentSecret);
        };

        if credential.matches_secret(self.digest(), current.expose_secret()) {
            Ok(())
        } else {
            Err(CredentialError::InvalidCurrentSecret)
        }
    }
}
