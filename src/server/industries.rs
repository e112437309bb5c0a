//! HTTP handlers for the industries resource
//!
//! Industries have no update or delete operations; besides create and
//! list, the only mutation is associating a company with an industry.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Serialize;

use crate::core::error::ApiError;
use crate::core::slug::slugify;
use crate::entities::{AssociateCompanyInput, Industry, IndustryInput, IndustryWithCompanies};
use crate::server::{AppState, require};

/// Response wrapping a single industry.
#[derive(Debug, Serialize)]
pub struct IndustryResponse {
    pub industry: Industry,
}

/// Response wrapping an industry with its company codes.
#[derive(Debug, Serialize)]
pub struct IndustryDetailResponse {
    pub industry: IndustryWithCompanies,
}

/// GET /industries
///
/// Returns a bare array rather than an envelope. The company codes for
/// every industry come from a single join computed before responding,
/// so `company_codes` is always present (empty when unassociated).
pub async fn list_industries(
    State(state): State<AppState>,
) -> Result<Json<Vec<IndustryWithCompanies>>, ApiError> {
    let industries = state.industries.list_with_companies().await?;
    Ok(Json(industries))
}

/// POST /industries
pub async fn create_industry(
    State(state): State<AppState>,
    Json(body): Json<IndustryInput>,
) -> Result<(StatusCode, Json<IndustryResponse>), ApiError> {
    let name = require(body.industry, "request must include industry")?;

    let industry = state
        .industries
        .insert(Industry {
            code: slugify(&name),
            industry: name,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(IndustryResponse { industry })))
}

/// POST /industries/{code}
///
/// Associates a company with an existing industry, then returns the
/// industry with its freshly computed company codes.
pub async fn associate_company(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(body): Json<AssociateCompanyInput>,
) -> Result<(StatusCode, Json<IndustryDetailResponse>), ApiError> {
    let company_code = require(body.company_code, "request must include company_code")?;

    let industry = state
        .industries
        .get(&code)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no industry found with code '{}'", code)))?;

    state
        .industries
        .associate_company(&company_code, &code)
        .await?;

    let company_codes = state.industries.company_codes(&code).await?;

    Ok((
        StatusCode::CREATED,
        Json(IndustryDetailResponse {
            industry: IndustryWithCompanies {
                code: industry.code,
                industry: industry.industry,
                company_codes,
            },
        }),
    ))
}
