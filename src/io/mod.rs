//! Report exports: monthly CSV and PDF.

mod csv_report;
mod currency;
pub mod layout;
mod pdf_report;
mod win_ansi;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::info;

use crate::application::{AppError, LedgerService, ReportFile, ReportFormat};

pub use csv_report::render_csv;
pub use currency::Currency;
pub use pdf_report::{layout_report, render_pdf};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Day/month/year without zero padding, e.g. "5/3/2024".
pub fn display_date(date: DateTime<Utc>) -> String {
    date.format("%-d/%-m/%Y").to_string()
}

/// Builds downloadable monthly reports from the ledger.
pub struct Exporter<'a> {
    service: &'a LedgerService,
    currency: &'a Currency,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a LedgerService, currency: &'a Currency) -> Self {
        Self { service, currency }
    }

    pub async fn monthly_csv(&self, year: i32, month: u32) -> Result<ReportFile, AppError> {
        self.monthly(year, month, ReportFormat::Csv).await
    }

    pub async fn monthly_pdf(&self, year: i32, month: u32) -> Result<ReportFile, AppError> {
        self.monthly(year, month, ReportFormat::Pdf).await
    }

    /// Fetch the month once and render it in the requested format.
    pub async fn monthly(
        &self,
        year: i32,
        month: u32,
        format: ReportFormat,
    ) -> Result<ReportFile, AppError> {
        let report = self.service.monthly_report(year, month).await?;
        let bytes = match format {
            ReportFormat::Csv => render_csv(&report, self.currency)?,
            ReportFormat::Pdf => render_pdf(&report, self.currency)?,
        };
        let file = ReportFile::new(&report.period, format, bytes);
        info!(
            period = %report.period,
            transactions = report.transactions.len(),
            file = %file.file_name,
            bytes = file.bytes.len(),
            "Generated monthly report"
        );
        Ok(file)
    }
}
