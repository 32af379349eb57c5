//! JSON API over the ledger and its monthly reports.

mod error;
pub mod handlers;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::application::LedgerService;
use crate::io::Currency;

pub use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<LedgerService>,
    pub currency: Arc<Currency>,
}

impl AppState {
    pub fn new(service: LedgerService, currency: Currency) -> Self {
        Self {
            service: Arc::new(service),
            currency: Arc::new(currency),
        }
    }
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health))
        // transactions
        .route(
            "/transactions",
            get(handlers::list_transactions).post(handlers::create_transaction),
        )
        .route("/transactions/summary/stats", get(handlers::summary))
        .route(
            "/transactions/:id",
            get(handlers::get_transaction)
                .put(handlers::update_transaction)
                .delete(handlers::delete_transaction),
        )
        // reports
        .route(
            "/reports/monthly/:year/:month",
            get(handlers::monthly_transactions),
        )
        .route("/reports/monthly/:year/:month/csv", get(handlers::monthly_csv))
        .route("/reports/monthly/:year/:month/pdf", get(handlers::monthly_pdf))
}

/// The API under `/api`, open to browser clients on any origin.
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve the API until Ctrl-C, letting in-flight requests finish.
pub async fn serve(state: AppState, addr: &str) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(address = %listener.local_addr()?, "Server is running");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown requested"),
        Err(e) => {
            error!(error = %e, "Failed to listen for Ctrl-C; running until killed");
            std::future::pending::<()>().await;
        }
    }
}
