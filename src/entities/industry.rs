//! Industry entity and its request/response shapes

use serde::{Deserialize, Serialize};

/// An industry row: `code` is the slug-derived primary key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Industry {
    pub code: String,
    pub industry: String,
}

/// Request body for creating an industry.
#[derive(Debug, Deserialize)]
pub struct IndustryInput {
    pub industry: Option<String>,
}

/// Request body for associating a company with an industry.
#[derive(Debug, Deserialize)]
pub struct AssociateCompanyInput {
    pub company_code: Option<String>,
}

/// An industry with the codes of its associated companies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryWithCompanies {
    pub code: String,
    pub industry: String,
    pub company_codes: Vec<String>,
}
