// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use lopdf::content::Content;
use lopdf::{Document, Object};
use pocketbook::application::LedgerService;
use pocketbook::domain::{Transaction, TransactionInput};
use serde_json::json;
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(LedgerService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = LedgerService::init(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// Helper to parse a date string into DateTime<Utc>
pub fn parse_date(date_str: &str) -> DateTime<Utc> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
}

pub fn input(description: &str, amount: f64, kind: &str) -> TransactionInput {
    TransactionInput::new(description, json!(amount), kind)
}

/// Insert a transaction with an explicit effective date, bypassing the "dated now" rule
/// of the public create operation.
pub async fn record_on(
    service: &LedgerService,
    date: &str,
    description: &str,
    amount: f64,
    kind: &str,
) -> Result<Transaction> {
    let draft = input(description, amount, kind).validate()?;
    Ok(service
        .repository()
        .insert_transaction(&draft, parse_date(date))
        .await?)
}

/// Overwrite a row's insertion timestamp through a second connection to the same file.
pub async fn set_created_at(temp: &TempDir, id: i64, created_at: &str) -> Result<()> {
    let url = format!("sqlite:{}", temp.path().join("test.db").display());
    let pool = SqlitePool::connect(&url).await?;
    sqlx::query("UPDATE transactions SET created_at = ? WHERE id = ?")
        .bind(created_at)
        .bind(id)
        .execute(&pool)
        .await?;
    pool.close().await;
    Ok(())
}

/// Every string shown with `Tj` in a PDF, page by page, in drawing order.
pub fn pdf_text(bytes: &[u8]) -> Result<Vec<String>> {
    let doc = Document::load_mem(bytes)?;
    let mut texts = Vec::new();
    for (_, page_id) in doc.get_pages() {
        let content = Content::decode(&doc.get_page_content(page_id)?)?;
        for op in content.operations {
            if op.operator == "Tj" {
                if let Some(Object::String(bytes, _)) = op.operands.first() {
                    texts.push(String::from_utf8_lossy(bytes).into_owned());
                }
            }
        }
    }
    Ok(texts)
}
