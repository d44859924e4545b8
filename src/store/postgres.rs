//! Postgres store for account records.

use super::AccountStore;
use crate::account::Account;
use anyhow::{anyhow, Context, Result};
use secrecy::{ExposeSecret, SecretString};
use sqlx::{postgres::PgPoolOptions, PgPool, Row};
use tracing::Instrument;
use uuid::Uuid;

pub const SCHEMA_SQL: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/sql/schema.sql"));

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

fn query_span(operation: &'static str, statement: &'static str) -> tracing::Span {
    tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = operation,
        db.statement = statement
    )
}

impl PgStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a small pool to `dsn`.
    ///
    /// # Errors
    /// Returns an error if the database is unreachable.
    pub async fn connect(dsn: &SecretString) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(dsn.expose_secret())
            .await
            .context("failed to connect to database")?;

        Ok(Self::new(pool))
    }

    /// Create the `accounts` table if it does not exist.
    ///
    /// # Errors
    /// Returns an error if the schema statements fail.
    pub async fn apply_schema(&self) -> Result<()> {
        sqlx::raw_sql(SCHEMA_SQL)
            .execute(&self.pool)
            .instrument(query_span("CREATE", "schema.sql"))
            .await
            .context("failed to apply schema")?;
        Ok(())
    }
}

impl AccountStore for PgStore {
    async fn load(&self, id: Uuid) -> Result<Option<Account>> {
        let query = "SELECT id, email, secret_digest FROM accounts WHERE id = $1";
        let row = sqlx::query(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .instrument(query_span("SELECT", query))
            .await
            .context("failed to load account")?;

        Ok(row.map(|row| {
            Account::from_storage(
                row.get::<Uuid, _>("id"),
                row.get::<String, _>("email"),
                row.get::<String, _>("secret_digest"),
            )
        }))
    }

    async fn insert(&self, account: &Account) -> Result<()> {
        let query = "INSERT INTO accounts (id, email, secret_digest) VALUES ($1, $2, $3)";
        sqlx::query(query)
            .bind(account.id())
            .bind(account.email())
            .bind(account.credential().stored_digest())
            .execute(&self.pool)
            .instrument(query_span("INSERT", query))
            .await
            .context("failed to insert account")?;
        Ok(())
    }

    async fn update(&self, account: &Account) -> Result<()> {
        let query = r"
            UPDATE accounts
            SET email = $2, secret_digest = $3, updated_at = NOW()
            WHERE id = $1
        ";
        let result = sqlx::query(query)
            .bind(account.id())
            .bind(account.email())
            .bind(account.credential().stored_digest())
            .execute(&self.pool)
            .instrument(query_span("UPDATE", query))
            .await
            .context("failed to update account")?;

        if result.rows_affected() == 0 {
            return Err(anyhow!("account {} not found", account.id()));
        }
        Ok(())
    }
}
