//! # Biztime
//!
//! A REST API for tracking companies, their invoices, and the industries
//! they belong to. Three relational tables plus a many-to-many join table,
//! exposed as JSON CRUD endpoints:
//!
//! - `/companies` — list/get/create/update/delete; companies are keyed by
//!   a slug derived from their name
//! - `/invoices` — list/get/create/update/delete; payment updates manage
//!   `paid_date` automatically
//! - `/industries` — list/create, plus associating companies
//!
//! Handlers are written against storage traits, so the full HTTP surface
//! runs against PostgreSQL in production and an in-memory store in tests:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use biztime::prelude::*;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let state = AppState::from_store(Arc::new(InMemoryStore::new()));
//! serve("127.0.0.1:3000", build_router(state)).await
//! # }
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{ApiError, ErrorBody, StoreError},
        slug::slugify,
        store::{CompanyStore, IndustryStore, InvoiceStore},
    };

    // === Entities ===
    pub use crate::entities::{
        AssociateCompanyInput, Company, CompanyDetail, CompanyInput, Industry, IndustryInput,
        IndustryWithCompanies, Invoice, InvoiceDetail, InvoiceInput, InvoiceUpdateInput,
        NewInvoice,
    };

    // === Server ===
    pub use crate::server::{AppState, build_router, serve};

    // === Storage ===
    pub use crate::storage::{InMemoryStore, PgStore};

    // === Config ===
    pub use crate::config::AppConfig;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::NaiveDate;
    pub use serde::{Deserialize, Serialize};
}
