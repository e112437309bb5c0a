//! HTTP handlers for the companies resource

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Serialize;

use crate::core::error::ApiError;
use crate::core::slug::slugify;
use crate::entities::{Company, CompanyDetail, CompanyInput};
use crate::server::{AppState, DeleteResponse, require};

/// Response for the list endpoint.
#[derive(Debug, Serialize)]
pub struct CompanyListResponse {
    pub companies: Vec<Company>,
}

/// Response wrapping a single company.
#[derive(Debug, Serialize)]
pub struct CompanyResponse {
    pub company: Company,
}

/// Response wrapping a company joined with industries and invoices.
#[derive(Debug, Serialize)]
pub struct CompanyDetailResponse {
    pub company: CompanyDetail,
}

/// GET /companies
pub async fn list_companies(
    State(state): State<AppState>,
) -> Result<Json<CompanyListResponse>, ApiError> {
    let companies = state.companies.list().await?;
    Ok(Json(CompanyListResponse { companies }))
}

/// GET /companies/{code}
///
/// Two sequential store calls: the company joined with its industry
/// names, then the company's invoices.
pub async fn get_company(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<CompanyDetailResponse>, ApiError> {
    let (company, industries) = state
        .companies
        .get_with_industries(&code)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no company found with code '{}'", code)))?;

    let invoices = state.invoices.list_for_company(&company.code).await?;

    Ok(Json(CompanyDetailResponse {
        company: CompanyDetail {
            code: company.code,
            name: company.name,
            industries,
            description: company.description,
            invoices,
        },
    }))
}

/// POST /companies
///
/// The primary key is derived from the name; creating two companies
/// whose names slug to the same code fails on the duplicate key.
pub async fn create_company(
    State(state): State<AppState>,
    Json(body): Json<CompanyInput>,
) -> Result<(StatusCode, Json<CompanyResponse>), ApiError> {
    let name = require(body.name, "request must include name and description")?;
    let description = require(body.description, "request must include name and description")?;

    let company = state
        .companies
        .insert(Company {
            code: slugify(&name),
            name,
            description,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(CompanyResponse { company })))
}

/// PUT /companies/{code}
pub async fn update_company(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(body): Json<CompanyInput>,
) -> Result<Json<CompanyResponse>, ApiError> {
    let name = require(body.name, "request must include name and description")?;
    let description = require(body.description, "request must include name and description")?;

    let company = state
        .companies
        .update(&code, &name, &description)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no company found with code '{}'", code)))?;

    Ok(Json(CompanyResponse { company }))
}

/// DELETE /companies/{code}
pub async fn delete_company(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    if code.is_empty() {
        return Err(ApiError::InvalidInput("company code is required".to_string()));
    }

    let affected = state.companies.delete(&code).await?;
    if affected == 0 {
        return Err(ApiError::NotFound(format!(
            "no company found with code '{}'",
            code
        )));
    }

    Ok(Json(DeleteResponse::deleted()))
}
