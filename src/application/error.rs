use thiserror::Error;

use crate::domain::{TransactionId, ValidationError};
use crate::io::ExportError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Transaction not found: {0}")]
    TransactionNotFound(TransactionId),

    #[error("Totals exceed the supported range")]
    TotalsOverflow,

    #[error("Report export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}
