//! Company entity and its request/response shapes

use crate::entities::Invoice;
use serde::{Deserialize, Serialize};

/// A company row: `code` is the slug-derived primary key, immutable
/// after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Company {
    pub code: String,
    pub name: String,
    pub description: String,
}

/// Request body for creating or updating a company.
///
/// Fields are optional so presence is checked by the handler rather than
/// rejected by deserialization; an empty string counts as missing.
#[derive(Debug, Deserialize)]
pub struct CompanyInput {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// A company joined with its industry names and invoices, as returned
/// by the get-by-code endpoint.
#[derive(Debug, Serialize)]
pub struct CompanyDetail {
    pub code: String,
    pub name: String,
    pub industries: Vec<String>,
    pub description: String,
    pub invoices: Vec<Invoice>,
}
