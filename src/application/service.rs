use chrono::Utc;
use tracing::{debug, info};

use crate::domain::{MonthPeriod, Summary, Transaction, TransactionId, TransactionInput};
use crate::storage::Repository;

use super::{AppError, MonthlyReport};

/// Application service providing the ledger operations.
/// This is the primary interface for any client (HTTP API, CLI).
pub struct LedgerService {
    repo: Repository,
}

impl LedgerService {
    /// Create a new ledger service with the given repository.
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Open (creating if needed) the database at the given path and ensure the schema exists.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        info!(database = database_path, "Ledger database ready");
        Ok(Self::new(repo))
    }

    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    // ========================
    // Transaction operations
    // ========================

    /// List all transactions, newest first.
    pub async fn list_transactions(&self) -> Result<Vec<Transaction>, AppError> {
        let transactions = self.repo.list_transactions().await?;
        debug!(count = transactions.len(), "Listed transactions");
        Ok(transactions)
    }

    /// Get a transaction by ID.
    pub async fn get_transaction(&self, id: TransactionId) -> Result<Transaction, AppError> {
        self.repo
            .get_transaction(id)
            .await?
            .ok_or(AppError::TransactionNotFound(id))
    }

    /// Record a new transaction dated now.
    pub async fn create_transaction(&self, input: TransactionInput) -> Result<Transaction, AppError> {
        let draft = input.validate()?;
        let transaction = self.repo.insert_transaction(&draft, Utc::now()).await?;
        info!(
            id = transaction.id,
            kind = %transaction.kind,
            amount = %transaction.amount,
            "Created transaction"
        );
        Ok(transaction)
    }

    /// Replace description, amount and type. The effective date is kept.
    pub async fn update_transaction(
        &self,
        id: TransactionId,
        input: TransactionInput,
    ) -> Result<Transaction, AppError> {
        let draft = input.validate()?;
        let transaction = self
            .repo
            .update_transaction(id, &draft)
            .await?
            .ok_or(AppError::TransactionNotFound(id))?;
        info!(id, "Updated transaction");
        Ok(transaction)
    }

    /// Permanently delete a transaction.
    pub async fn delete_transaction(&self, id: TransactionId) -> Result<(), AppError> {
        if !self.repo.delete_transaction(id).await? {
            return Err(AppError::TransactionNotFound(id));
        }
        info!(id, "Deleted transaction");
        Ok(())
    }

    /// Totals over the whole ledger, read fresh from the store.
    pub async fn summary(&self) -> Result<Summary, AppError> {
        let amounts = self.repo.list_amounts().await?;
        Summary::from_amounts(amounts).ok_or(AppError::TotalsOverflow)
    }

    // ========================
    // Reporting
    // ========================

    /// Transactions dated within the given calendar month, newest first.
    pub async fn monthly_transactions(
        &self,
        year: i32,
        month: u32,
    ) -> Result<Vec<Transaction>, AppError> {
        let period = MonthPeriod::new(year, month)?;
        let transactions = self
            .repo
            .list_transactions_between(period.start(), period.end())
            .await?;
        debug!(%period, count = transactions.len(), "Fetched monthly transactions");
        Ok(transactions)
    }

    /// Transactions and totals for the given calendar month.
    pub async fn monthly_report(&self, year: i32, month: u32) -> Result<MonthlyReport, AppError> {
        let period = MonthPeriod::new(year, month)?;
        let transactions = self.monthly_transactions(year, month).await?;
        MonthlyReport::new(period, transactions)
    }
}
