//! One-way secret digests.
//!
//! Digests are Argon2id PHC strings (`$argon2id$v=19$m=..,t=..,p=..$salt$hash`).
//! Each call to [`DigestEngine::hash`] draws a fresh salt, and verification
//! reads salt and cost back out of the stored string, so changing the
//! configured cost never invalidates existing digests.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum DigestError {
    #[error("invalid digest parameters: {0}")]
    Params(String),
    #[error("failed to compute digest: {0}")]
    Hash(String),
}

/// Cost and pepper used to compute new digests.
#[derive(Debug, Clone)]
pub struct DigestConfig {
    memory_cost_kib: u32,
    iterations: u32,
    parallelism: u32,
    pepper: Option<SecretString>,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            memory_cost_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
            pepper: None,
        }
    }
}

impl DigestConfig {
    #[must_use]
    pub fn with_memory_cost_kib(mut self, memory_cost_kib: u32) -> Self {
        self.memory_cost_kib = memory_cost_kib;
        self
    }

    #[must_use]
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    #[must_use]
    pub fn with_parallelism(mut self, parallelism: u32) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// Server-side secret mixed into every digest. An empty pepper is ignored.
    #[must_use]
    pub fn with_pepper(mut self, pepper: SecretString) -> Self {
        self.pepper = if pepper.expose_secret().is_empty() {
            None
        } else {
            Some(pepper)
        };
        self
    }

    #[must_use]
    pub const fn memory_cost_kib(&self) -> u32 {
        self.memory_cost_kib
    }

    #[must_use]
    pub const fn iterations(&self) -> u32 {
        self.iterations
    }

    #[must_use]
    pub const fn parallelism(&self) -> u32 {
        self.parallelism
    }

    #[must_use]
    pub fn has_pepper(&self) -> bool {
        self.pepper.is_some()
    }
}

/// Hashes and verifies secrets with the injected [`DigestConfig`].
#[derive(Debug, Clone)]
pub struct DigestEngine {
    config: DigestConfig,
    params: Params,
}

impl DigestEngine {
    /// Build an engine, rejecting cost parameters Argon2 would refuse.
    ///
    /// # Errors
    /// Returns [`DigestError::Params`] when the memory, iteration or
    /// parallelism cost is out of range.
    pub fn new(config: DigestConfig) -> Result<Self, DigestError> {
        let params = Params::new(
            config.memory_cost_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| DigestError::Params(e.to_string()))?;

        debug!(
            m_cost = params.m_cost(),
            t_cost = params.t_cost(),
            p_cost = params.p_cost(),
            pepper = config.has_pepper(),
            "digest engine configured"
        );

        Ok(Self { config, params })
    }

    #[must_use]
    pub const fn config(&self) -> &DigestConfig {
        &self.config
    }

    fn argon2(&self) -> Result<Argon2<'_>, DigestError> {
        match &self.config.pepper {
            Some(pepper) => Argon2::new_with_secret(
                pepper.expose_secret().as_bytes(),
                Algorithm::Argon2id,
                Version::V0x13,
                self.params.clone(),
            )
            .map_err(|e| DigestError::Params(e.to_string())),
            None => Ok(Argon2::new(
                Algorithm::Argon2id,
                Version::V0x13,
                self.params.clone(),
            )),
        }
    }

    /// Compute a salted digest of `plaintext`.
    ///
    /// # Errors
    /// Returns [`DigestError`] if Argon2 cannot be initialised or fails.
    #[instrument(skip_all)]
    pub fn hash(&self, plaintext: &str) -> Result<String, DigestError> {
        let salt = SaltString::generate(&mut OsRng);
        let digest = self
            .argon2()?
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| DigestError::Hash(e.to_string()))?
            .to_string();
        Ok(digest)
    }

    /// Check `plaintext` against `digest`. Malformed or empty digests never match.
    #[instrument(skip_all)]
    pub fn verify(&self, plaintext: &str, digest: &str) -> bool {
        if digest.is_empty() {
            return false;
        }

        let Ok(parsed) = PasswordHash::new(digest) else {
            debug!("stored digest is not a valid PHC string");
            return false;
        };

        let Ok(argon2) = self.argon2() else {
            return false;
        };

        argon2.verify_password(plaintext.as_bytes(), &parsed).is_ok()
    }

    /// True when `digest` was not produced with the current algorithm and cost.
    #[must_use]
    pub fn needs_rehash(&self, digest: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(digest) else {
            return true;
        };

        if parsed.algorithm.as_str() != Algorithm::Argon2id.as_str() {
            return true;
        }

        Params::try_from(&parsed).map_or(true, |params| {
            params.m_cost() != self.params.m_cost()
                || params.t_cost() != self.params.t_cost()
                || params.p_cost() != self.params.p_cost()
        })
    }
}
