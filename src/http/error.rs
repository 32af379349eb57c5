use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::application::AppError;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// An error as the API reports it: a status code and a message safe to show a client.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Map an application error, using `message` in place of any server-side failure detail.
    pub fn context(message: &'static str) -> impl FnOnce(AppError) -> ApiError {
        move |err| ApiError::from_app(err, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    fn from_app(err: AppError, message: &'static str) -> Self {
        match &err {
            AppError::Validation(e) => {
                warn!(error = %e, "Rejected invalid request");
                Self::new(StatusCode::BAD_REQUEST, e.to_string())
            }
            AppError::TransactionNotFound(id) => {
                debug!(id, "Transaction not found");
                Self::new(StatusCode::NOT_FOUND, "Transaction not found")
            }
            AppError::TotalsOverflow | AppError::Export(_) | AppError::Database(_) => {
                error!(error = ?err, "{message}");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}
