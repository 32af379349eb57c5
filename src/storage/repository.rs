use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use rust_decimal::Decimal;
use sqlx::{Row, SqlitePool};
use std::str::FromStr;

use crate::domain::{Transaction, TransactionDraft, TransactionId, TransactionType};

use super::MIGRATION_001_INITIAL;

const TRANSACTION_COLUMNS: &str = "id, description, amount, type, date, created_at";

/// Render a timestamp the way it is stored: fixed-width, microsecond precision, `Z` suffix.
/// Lexicographic order of the stored text matches chronological order.
pub fn to_db_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Durable store for ledger transactions. Owns its connection pool.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database URL such as `sqlite:ledger.db?mode=rwc`.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options =
            SqliteConnectOptions::from_str(database_url).context("Invalid database URL")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Create the schema. Safe to run against an existing database.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;
        Ok(())
    }

    /// Initialize a database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    /// Insert a transaction with the given effective date and return the stored row.
    /// `created_at` is always the insertion time.
    pub async fn insert_transaction(
        &self,
        draft: &TransactionDraft,
        date: DateTime<Utc>,
    ) -> Result<Transaction> {
        let query = format!(
            r#"
            INSERT INTO transactions (description, amount, type, date, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING {TRANSACTION_COLUMNS}
            "#
        );
        let row = sqlx::query(&query)
            .bind(&draft.description)
            .bind(draft.amount.to_string())
            .bind(draft.kind.as_str())
            .bind(to_db_timestamp(date))
            .bind(to_db_timestamp(Utc::now()))
            .fetch_one(&self.pool)
            .await
            .context("Failed to insert transaction")?;

        Self::row_to_transaction(&row)
    }

    /// Get a transaction by ID.
    pub async fn get_transaction(&self, id: TransactionId) -> Result<Option<Transaction>> {
        let query = format!("SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE id = ?");
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch transaction")?;

        row.as_ref().map(Self::row_to_transaction).transpose()
    }

    /// List every transaction, newest effective date first.
    /// Equal dates fall back to insertion order, newest first.
    pub async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        let query = format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions ORDER BY date DESC, created_at DESC, id DESC"
        );
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list transactions")?;

        rows.iter().map(Self::row_to_transaction).collect()
    }

    /// List transactions with `start <= date < end`, newest first.
    pub async fn list_transactions_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Transaction>> {
        let query = format!(
            r#"
            SELECT {TRANSACTION_COLUMNS}
            FROM transactions
            WHERE date >= ? AND date < ?
            ORDER BY date DESC, created_at DESC, id DESC
            "#
        );
        let rows = sqlx::query(&query)
            .bind(to_db_timestamp(start))
            .bind(to_db_timestamp(end))
            .fetch_all(&self.pool)
            .await
            .context("Failed to list transactions in range")?;

        rows.iter().map(Self::row_to_transaction).collect()
    }

    /// Overwrite description, amount and type. Returns `None` if no row has this ID.
    pub async fn update_transaction(
        &self,
        id: TransactionId,
        draft: &TransactionDraft,
    ) -> Result<Option<Transaction>> {
        let query = format!(
            r#"
            UPDATE transactions
            SET description = ?, amount = ?, type = ?
            WHERE id = ?
            RETURNING {TRANSACTION_COLUMNS}
            "#
        );
        let row = sqlx::query(&query)
            .bind(&draft.description)
            .bind(draft.amount.to_string())
            .bind(draft.kind.as_str())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to update transaction")?;

        row.as_ref().map(Self::row_to_transaction).transpose()
    }

    /// Delete a transaction. Returns false if no row has this ID.
    pub async fn delete_transaction(&self, id: TransactionId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete transaction")?;

        Ok(result.rows_affected() > 0)
    }

    /// Type and amount of every transaction, for computing exact totals.
    /// SQL `SUM` would go through floating point or 64-bit integers, so the
    /// sum happens in `Decimal` on the caller's side.
    pub async fn list_amounts(&self) -> Result<Vec<(TransactionType, Decimal)>> {
        let rows = sqlx::query("SELECT type, amount FROM transactions")
            .fetch_all(&self.pool)
            .await
            .context("Failed to fetch amounts")?;

        rows.iter()
            .map(|row| -> Result<(TransactionType, Decimal)> {
                Ok((Self::row_to_type(row)?, Self::row_to_amount(row)?))
            })
            .collect()
    }

    /// Close the pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    fn row_to_type(row: &SqliteRow) -> Result<TransactionType> {
        let type_str: String = row.get("type");
        TransactionType::from_str(&type_str)
            .ok_or_else(|| anyhow::anyhow!("Invalid transaction type: {}", type_str))
    }

    fn row_to_amount(row: &SqliteRow) -> Result<Decimal> {
        let amount_str: String = row.get("amount");
        Decimal::from_str(&amount_str)
            .with_context(|| format!("Invalid stored amount: {amount_str}"))
    }

    fn row_to_transaction(row: &SqliteRow) -> Result<Transaction> {
        let date_str: String = row.get("date");
        let created_at_str: String = row.get("created_at");

        Ok(Transaction {
            id: row.get("id"),
            description: row.get("description"),
            amount: Self::row_to_amount(row)?,
            kind: Self::row_to_type(row)?,
            date: DateTime::parse_from_rfc3339(&date_str)
                .context("Invalid date timestamp")?
                .with_timezone(&Utc),
            created_at: DateTime::parse_from_rfc3339(&created_at_str)
                .context("Invalid created_at timestamp")?
                .with_timezone(&Utc),
        })
    }
}
