//! HTTP handlers for the invoices resource

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::Utc;
use serde::Serialize;

use crate::core::error::ApiError;
use crate::entities::{Invoice, InvoiceDetail, InvoiceInput, InvoiceUpdateInput, NewInvoice};
use crate::server::{AppState, DeleteResponse};

/// Response for the list endpoint.
#[derive(Debug, Serialize)]
pub struct InvoiceListResponse {
    pub invoices: Vec<Invoice>,
}

/// Response wrapping a single invoice.
#[derive(Debug, Serialize)]
pub struct InvoiceResponse {
    pub invoice: Invoice,
}

/// Response wrapping an invoice with its company embedded.
#[derive(Debug, Serialize)]
pub struct InvoiceDetailResponse {
    pub invoice: InvoiceDetail,
}

/// GET /invoices
pub async fn list_invoices(
    State(state): State<AppState>,
) -> Result<Json<InvoiceListResponse>, ApiError> {
    let invoices = state.invoices.list().await?;
    Ok(Json(InvoiceListResponse { invoices }))
}

/// GET /invoices/{id}
///
/// The second store call resolves the referenced company, which replaces
/// the bare `comp_code` in the response.
pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<InvoiceDetailResponse>, ApiError> {
    let invoice = state
        .invoices
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no invoice found with id {}", id)))?;

    let company = state
        .companies
        .get(&invoice.comp_code)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "no company found with code '{}'",
                invoice.comp_code
            ))
        })?;

    Ok(Json(InvoiceDetailResponse {
        invoice: InvoiceDetail {
            id: invoice.id,
            amt: invoice.amt,
            paid: invoice.paid,
            add_date: invoice.add_date,
            paid_date: invoice.paid_date,
            company,
        },
    }))
}

/// POST /invoices
///
/// `add_date` is stamped with the current date; new invoices start
/// unpaid with no `paid_date`. A zero amount is rejected along with a
/// missing one (see the amount-check note in DESIGN.md).
pub async fn create_invoice(
    State(state): State<AppState>,
    Json(body): Json<InvoiceInput>,
) -> Result<(StatusCode, Json<InvoiceResponse>), ApiError> {
    let comp_code = body.comp_code.filter(|c| !c.is_empty());
    let amt = body.amt.filter(|a| *a != 0.0);
    let (Some(comp_code), Some(amt)) = (comp_code, amt) else {
        return Err(ApiError::InvalidInput(
            "request must include comp_code and a nonzero amt".to_string(),
        ));
    };

    let invoice = state
        .invoices
        .insert(NewInvoice {
            comp_code,
            amt,
            paid: false,
            add_date: Utc::now().date_naive(),
            paid_date: None,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(InvoiceResponse { invoice })))
}

/// PUT /invoices/{id}
///
/// `paid_date` is recomputed from `paid` on every update regardless of
/// the row's prior state: marking an already-paid invoice paid again
/// resets the date to today, and marking it unpaid clears it.
pub async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<InvoiceUpdateInput>,
) -> Result<Json<InvoiceResponse>, ApiError> {
    let amt = body.amt.filter(|a| *a != 0.0);
    let (Some(amt), Some(paid)) = (amt, body.paid) else {
        return Err(ApiError::InvalidInput(
            "request must include a nonzero amt and a boolean paid".to_string(),
        ));
    };

    let paid_date = paid.then(|| Utc::now().date_naive());

    let invoice = state
        .invoices
        .update(id, amt, paid, paid_date)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no invoice found with id {}", id)))?;

    Ok(Json(InvoiceResponse { invoice }))
}

/// DELETE /invoices/{id}
pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let affected = state.invoices.delete(id).await?;
    if affected == 0 {
        return Err(ApiError::NotFound(format!("no invoice found with id {}", id)));
    }

    Ok(Json(DeleteResponse::deleted()))
}
