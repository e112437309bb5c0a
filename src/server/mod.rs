//! HTTP surface: application state, router, and server loop
//!
//! The router maps each resource's CRUD routes onto the handler modules
//! ([`companies`], [`invoices`], [`industries`]). Handlers talk to the
//! storage traits through [`AppState`], so the same router runs against
//! PostgreSQL in production and the in-memory store in tests.

pub mod companies;
pub mod industries;
pub mod invoices;

use crate::core::error::ApiError;
use crate::core::store::{CompanyStore, IndustryStore, InvoiceStore};
use anyhow::Result;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub companies: Arc<dyn CompanyStore>,
    pub invoices: Arc<dyn InvoiceStore>,
    pub industries: Arc<dyn IndustryStore>,
}

impl AppState {
    /// Build state from a single backend implementing all three traits.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: CompanyStore + InvoiceStore + IndustryStore + 'static,
    {
        Self {
            companies: store.clone(),
            invoices: store.clone(),
            industries: store,
        }
    }
}

/// Response body for successful deletes.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub status: String,
}

impl DeleteResponse {
    pub fn deleted() -> Self {
        Self {
            status: "deleted".to_string(),
        }
    }
}

/// Presence check for required body fields.
///
/// A field is missing when the key is absent or the value is empty, so
/// `""` is rejected the same way as an omitted field.
pub(crate) fn require(field: Option<String>, message: &str) -> Result<String, ApiError> {
    match field {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ApiError::InvalidInput(message.to_string())),
    }
}

/// Build the full application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/companies",
            get(companies::list_companies).post(companies::create_company),
        )
        .route(
            "/companies/{code}",
            get(companies::get_company)
                .put(companies::update_company)
                .delete(companies::delete_company),
        )
        .route(
            "/invoices",
            get(invoices::list_invoices).post(invoices::create_invoice),
        )
        .route(
            "/invoices/{id}",
            get(invoices::get_invoice)
                .put(invoices::update_invoice)
                .delete(invoices::delete_invoice),
        )
        .route(
            "/industries",
            get(industries::list_industries).post(industries::create_industry),
        )
        .route("/industries/{code}", post(industries::associate_company))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Health check endpoint handler.
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "biztime"
    }))
}

/// Bind the listener and serve the router until the process exits.
pub async fn serve(addr: &str, app: Router) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
