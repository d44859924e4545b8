use crate::credential::{DigestConfig, DigestEngine};
use crate::service::Credentials;
use crate::store::PgStore;
use anyhow::{Context, Result};
use secrecy::SecretString;

/// Options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalArgs {
    pub dsn: Option<SecretString>,
    pub digest: DigestConfig,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(digest: DigestConfig) -> Self {
        Self { dsn: None, digest }
    }

    pub fn set_dsn(&mut self, dsn: SecretString) {
        self.dsn = Some(dsn);
    }

    /// # Errors
    /// Returns an error if the configured digest cost is invalid.
    pub fn digest_engine(&self) -> Result<DigestEngine> {
        DigestEngine::new(self.digest.clone()).context("invalid digest configuration")
    }

    /// # Errors
    /// Returns an error if no DSN was given or the database is unreachable.
    pub async fn store(&self) -> Result<PgStore> {
        let dsn = self
            .dsn
            .as_ref()
            .context("missing required argument: --dsn")?;
        PgStore::connect(dsn).await
    }

    /// # Errors
    /// Returns an error if the store or the digest engine cannot be built.
    pub async fn credentials(&self) -> Result<Credentials<PgStore>> {
        Ok(Credentials::new(self.store().await?, self.digest_engine()?))
    }
}
