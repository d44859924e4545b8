//! In-process store backed by a map.

use super::AccountStore;
use crate::account::Account;
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

#[derive(Debug, Clone)]
struct Row {
    email: String,
    secret_digest: String,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    rows: Arc<Mutex<HashMap<Uuid, Row>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn rows(&self) -> Result<MutexGuard<'_, HashMap<Uuid, Row>>> {
        self.rows
            .lock()
            .map_err(|_| anyhow!("account store lock poisoned"))
    }

    /// Persisted digest for `id`, as a caller reloading the record would see it.
    ///
    /// # Errors
    /// Returns an error if the store lock is poisoned.
    pub fn stored_digest(&self, id: Uuid) -> Result<Option<String>> {
        Ok(self.rows()?.get(&id).map(|row| row.secret_digest.clone()))
    }

    fn row(account: &Account) -> Row {
        Row {
            email: account.email().to_string(),
            secret_digest: account.credential().stored_digest().to_string(),
        }
    }
}

impl AccountStore for MemoryStore {
    async fn load(&self, id: Uuid) -> Result<Option<Account>> {
        Ok(self
            .rows()?
            .get(&id)
            .map(|row| Account::from_storage(id, row.email.clone(), row.secret_digest.clone())))
    }

    async fn insert(&self, account: &Account) -> Result<()> {
        let mut rows = self.rows()?;
        if rows.contains_key(&account.id()) {
            return Err(anyhow!("account {} already exists", account.id()));
        }
        if rows.values().any(|row| row.email == account.email()) {
            return Err(anyhow!("email already taken"));
        }
        rows.insert(account.id(), Self::row(account));
        Ok(())
    }

    async fn update(&self, account: &Account) -> Result<()> {
        let mut rows = self.rows()?;
        if rows
            .iter()
            .any(|(id, row)| *id != account.id() && row.email == account.email())
        {
            return Err(anyhow!("email already taken"));
        }
        let row = rows
            .get_mut(&account.id())
            .ok_or_else(|| anyhow!("account {} not found", account.id()))?;
        *row = Self::row(account);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_then_load() {
        let store = MemoryStore::new();
        let account = Account::from_storage(Uuid::new_v4(), "user@example.com", "digest");
        store.insert(&account).await.unwrap();

        let loaded = store.load(account.id()).await.unwrap().unwrap();
        assert_eq!(loaded.email(), "user@example.com");
        assert_eq!(loaded.credential().stored_digest(), "digest");
        assert!(!loaded.is_new_record());
        assert!(!loaded.credential().has_transient_secrets());
    }

    #[tokio::test]
    async fn load_missing_returns_none() {
        let store = MemoryStore::new();
        assert!(store.load(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn insert_rejects_duplicates() {
        let store = MemoryStore::new();
        let account = Account::new("user@example.com");
        store.insert(&account).await.unwrap();

        assert!(store.insert(&account).await.is_err());
        assert!(store
            .insert(&Account::new("user@example.com"))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn update_requires_existing_row() {
        let store = MemoryStore::new();
        let account = Account::new("user@example.com");
        assert!(store.update(&account).await.is_err());
    }
}
