use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use crate::application::{AppError, ReportFile};
use crate::domain::{Summary, Transaction, TransactionId, TransactionInput, ValidationError};
use crate::io::Exporter;

use super::{ApiError, AppState};

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "message": "Server is running" }))
}

// ========================
// Transactions
// ========================

pub async fn list_transactions(
    State(state): State<AppState>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let transactions = state
        .service
        .list_transactions()
        .await
        .map_err(ApiError::context("Failed to fetch transactions"))?;
    Ok(Json(transactions))
}

pub async fn get_transaction(
    State(state): State<AppState>,
    id: Result<Path<TransactionId>, PathRejection>,
) -> Result<Json<Transaction>, ApiError> {
    let id = transaction_id(id)?;
    let transaction = state
        .service
        .get_transaction(id)
        .await
        .map_err(ApiError::context("Failed to fetch transaction"))?;
    Ok(Json(transaction))
}

pub async fn create_transaction(
    State(state): State<AppState>,
    body: Result<Json<TransactionInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    let input = request_body(body)?;
    let transaction = state
        .service
        .create_transaction(input)
        .await
        .map_err(ApiError::context("Failed to create transaction"))?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

pub async fn update_transaction(
    State(state): State<AppState>,
    id: Result<Path<TransactionId>, PathRejection>,
    body: Result<Json<TransactionInput>, JsonRejection>,
) -> Result<Json<Transaction>, ApiError> {
    let id = transaction_id(id)?;
    let input = request_body(body)?;
    let transaction = state
        .service
        .update_transaction(id, input)
        .await
        .map_err(ApiError::context("Failed to update transaction"))?;
    Ok(Json(transaction))
}

pub async fn delete_transaction(
    State(state): State<AppState>,
    id: Result<Path<TransactionId>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let id = transaction_id(id)?;
    state
        .service
        .delete_transaction(id)
        .await
        .map_err(ApiError::context("Failed to delete transaction"))?;
    Ok(Json(json!({ "message": "Transaction deleted successfully" })))
}

pub async fn summary(State(state): State<AppState>) -> Result<Json<Summary>, ApiError> {
    let summary = state
        .service
        .summary()
        .await
        .map_err(ApiError::context("Failed to fetch summary"))?;
    Ok(Json(summary))
}

// ========================
// Reports
// ========================

pub async fn monthly_transactions(
    State(state): State<AppState>,
    period: Result<Path<(i32, u32)>, PathRejection>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let (year, month) = report_period(period)?;
    let transactions = state
        .service
        .monthly_transactions(year, month)
        .await
        .map_err(ApiError::context("Failed to fetch monthly transactions"))?;
    Ok(Json(transactions))
}

pub async fn monthly_csv(
    State(state): State<AppState>,
    period: Result<Path<(i32, u32)>, PathRejection>,
) -> Result<Response, ApiError> {
    let (year, month) = report_period(period)?;
    let file = Exporter::new(&state.service, &state.currency)
        .monthly_csv(year, month)
        .await
        .map_err(ApiError::context("Failed to generate CSV report"))?;
    Ok(attachment(file))
}

pub async fn monthly_pdf(
    State(state): State<AppState>,
    period: Result<Path<(i32, u32)>, PathRejection>,
) -> Result<Response, ApiError> {
    let (year, month) = report_period(period)?;
    let file = Exporter::new(&state.service, &state.currency)
        .monthly_pdf(year, month)
        .await
        .map_err(ApiError::context("Failed to generate PDF report"))?;
    Ok(attachment(file))
}

fn attachment(file: ReportFile) -> Response {
    let headers = [
        (header::CONTENT_TYPE, file.content_type.to_string()),
        (header::CONTENT_DISPOSITION, file.content_disposition()),
    ];
    (headers, file.bytes).into_response()
}

/// An ID that is not an integer cannot name a stored transaction.
fn transaction_id(
    id: Result<Path<TransactionId>, PathRejection>,
) -> Result<TransactionId, ApiError> {
    id.map(|Path(id)| id)
        .map_err(|_| ApiError::new(StatusCode::NOT_FOUND, "Transaction not found"))
}

fn report_period(
    period: Result<Path<(i32, u32)>, PathRejection>,
) -> Result<(i32, u32), ApiError> {
    period.map(|Path(period)| period).map_err(|rejection| {
        ApiError::new(
            StatusCode::BAD_REQUEST,
            format!("Year and month must be integers: {}", rejection.body_text()),
        )
    })
}

/// Unreadable JSON is reported like any other invalid payload.
fn request_body(
    body: Result<Json<TransactionInput>, JsonRejection>,
) -> Result<TransactionInput, ApiError> {
    body.map(|Json(input)| input).map_err(|rejection| {
        ApiError::context("Invalid request body")(AppError::Validation(
            ValidationError::MalformedBody(rejection.body_text()),
        ))
    })
}
