//! Save and verification primitives over an [`AccountStore`].

pub mod update;

use crate::{
    account::Account,
    credential::{validate, BeforeSave, DigestEngine},
    error::Error,
    store::AccountStore,
};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

pub struct Credentials<S> {
    store: S,
    digest: DigestEngine,
}

impl<S: AccountStore> Credentials<S> {
    #[must_use]
    pub const fn new(store: S, digest: DigestEngine) -> Self {
        Self { store, digest }
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub const fn digest(&self) -> &DigestEngine {
        &self.digest
    }

    async fn load(&self, id: Uuid) -> Result<Account, Error> {
        self.store.load(id).await?.ok_or(Error::NotFound(id))
    }

    /// First save of a new holder; a secret is mandatory.
    ///
    /// # Errors
    /// See [`Credentials::save`].
    pub async fn create(&self, account: &mut Account) -> Result<(), Error> {
        self.save(account).await
    }

    /// Validate, digest and persist `account`.
    ///
    /// Transient secrets are wiped whatever the outcome. On failure the
    /// in-memory digest is left as it was before the call.
    ///
    /// # Errors
    /// [`Error::Invalid`] when validation fails, [`Error::Digest`] or
    /// [`Error::Store`] for collaborator faults.
    #[instrument(skip_all, fields(account_id = %account.id()))]
    pub async fn save(&self, account: &mut Account) -> Result<(), Error> {
        let result = self.persist(account).await;
        account.credential_mut().clear_transient();
        result
    }

    async fn persist(&self, account: &mut Account) -> Result<(), Error> {
        let new_record = account.is_new_record();
        validate(account.credential(), new_record)?;

        let snapshot = account.snapshot();
        account.before_save(&self.digest)?;

        let stored = if new_record {
            self.store.insert(account).await
        } else {
            self.store.update(account).await
        };

        if let Err(err) = stored {
            warn!("failed to persist account: {err:#}");
            account.restore(snapshot);
            return Err(Error::Store(err));
        }

        account.mark_persisted();
        debug!(new_record, "account saved");
        Ok(())
    }

    /// Login-time check of `plaintext` against the holder's stored digest.
    ///
    /// # Errors
    /// [`Error::NotFound`] for an unknown holder, [`Error::Store`] on load failure.
    #[instrument(skip(self, plaintext))]
    pub async fn matches_secret(&self, id: Uuid, plaintext: &str) -> Result<bool, Error> {
        let account = self.load(id).await?;
        Ok(account.credential().matches_secret(&self.digest, plaintext))
    }

    /// Whether the holder has a usable secret (false e.g. for pending invitations).
    ///
    /// # Errors
    /// [`Error::NotFound`] for an unknown holder, [`Error::Store`] on load failure.
    #[instrument(skip(self))]
    pub async fn has_stored_digest(&self, id: Uuid) -> Result<bool, Error> {
        Ok(self.load(id).await?.credential().has_stored_digest())
    }
}
