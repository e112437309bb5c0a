//! Invoice entity and its request/response shapes

use crate::entities::Company;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An invoice row. `id` is assigned by the store; `add_date` is set once
/// at creation; `paid_date` is present iff the invoice was paid at its
/// last write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Invoice {
    pub id: i32,
    pub comp_code: String,
    pub amt: f64,
    pub paid: bool,
    pub add_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
}

/// Fields of an invoice about to be inserted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewInvoice {
    pub comp_code: String,
    pub amt: f64,
    pub paid: bool,
    pub add_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
}

/// Request body for creating an invoice.
#[derive(Debug, Deserialize)]
pub struct InvoiceInput {
    pub comp_code: Option<String>,
    pub amt: Option<f64>,
}

/// Request body for updating an invoice's amount and payment state.
#[derive(Debug, Deserialize)]
pub struct InvoiceUpdateInput {
    pub amt: Option<f64>,
    pub paid: Option<bool>,
}

/// An invoice with its company embedded, as returned by the get-by-id
/// endpoint. The bare `comp_code` column is replaced by the full company.
#[derive(Debug, Serialize)]
pub struct InvoiceDetail {
    pub id: i32,
    pub amt: f64,
    pub paid: bool,
    pub add_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
    pub company: Company,
}
