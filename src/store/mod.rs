//! Persistence collaborators.
//!
//! A store writes the whole persisted state of an account (non-secret
//! attributes and the digest) in one operation, so a save either commits
//! entirely or not at all. Serializing concurrent writers to the same row is
//! the store's job.

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::account::Account;
use anyhow::Result;
use std::future::Future;
use uuid::Uuid;

pub trait AccountStore {
    /// Load an account with empty transient fields.
    fn load(&self, id: Uuid) -> impl Future<Output = Result<Option<Account>>> + Send;

    /// First save of a new account.
    fn insert(&self, account: &Account) -> impl Future<Output = Result<()>> + Send;

    /// Overwrite the persisted state of an existing account.
    fn update(&self, account: &Account) -> impl Future<Output = Result<()>> + Send;
}
