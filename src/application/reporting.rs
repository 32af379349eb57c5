use serde::Serialize;

use crate::domain::{MonthPeriod, Summary, Transaction};

use super::AppError;

/// One calendar month of the ledger: its transactions (newest first) and their totals.
/// Every export format renders from the same instance, so totals agree across formats.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyReport {
    pub period: MonthPeriod,
    pub transactions: Vec<Transaction>,
    pub totals: Summary,
}

impl MonthlyReport {
    pub fn new(period: MonthPeriod, transactions: Vec<Transaction>) -> Result<Self, AppError> {
        let totals = Summary::from_transactions(&transactions).ok_or(AppError::TotalsOverflow)?;
        Ok(Self {
            period,
            transactions,
            totals,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Output encodings for a monthly report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Csv,
    Pdf,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Pdf => "pdf",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "text/csv; charset=utf-8",
            ReportFormat::Pdf => "application/pdf",
        }
    }
}

/// A rendered report ready to be sent as an attachment or written to disk.
#[derive(Debug, Clone)]
pub struct ReportFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ReportFile {
    pub fn new(period: &MonthPeriod, format: ReportFormat, bytes: Vec<u8>) -> Self {
        Self {
            file_name: format!("{}.{}", period.report_stem(), format.extension()),
            content_type: format.content_type(),
            bytes,
        }
    }

    /// Value for a `Content-Disposition` header.
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.file_name)
    }
}
