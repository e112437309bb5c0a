//! Storage traits for the three resources
//!
//! Handlers are written against these traits rather than a concrete
//! database, so the whole HTTP surface can run against the in-memory
//! backend in tests. Implementations live in [`crate::storage`].
//!
//! Methods map one-to-one onto the parameterized statements a backend
//! issues; no trait method spans more than a single statement, so a
//! handler that needs two queries makes two sequential calls (there is
//! no transaction wrapping).

use crate::core::error::StoreError;
use crate::entities::{Company, Industry, IndustryWithCompanies, Invoice, NewInvoice};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Storage operations for companies.
#[async_trait]
pub trait CompanyStore: Send + Sync {
    /// List every company, ordered by code.
    async fn list(&self) -> Result<Vec<Company>, StoreError>;

    /// Fetch a single company by code.
    async fn get(&self, code: &str) -> Result<Option<Company>, StoreError>;

    /// Fetch a company together with the names of its associated
    /// industries. Returns `None` when no company matches; a company
    /// with no industry associations yields an empty list.
    async fn get_with_industries(
        &self,
        code: &str,
    ) -> Result<Option<(Company, Vec<String>)>, StoreError>;

    /// Insert a new company. Fails with [`StoreError::Duplicate`] (or the
    /// database's unique-violation error) when the code already exists.
    async fn insert(&self, company: Company) -> Result<Company, StoreError>;

    /// Update a company's name and description in place. Returns `None`
    /// when no row matches the code.
    async fn update(
        &self,
        code: &str,
        name: &str,
        description: &str,
    ) -> Result<Option<Company>, StoreError>;

    /// Delete a company by code, returning the number of rows affected.
    async fn delete(&self, code: &str) -> Result<u64, StoreError>;
}

/// Storage operations for invoices.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// List every invoice, ordered by id.
    async fn list(&self) -> Result<Vec<Invoice>, StoreError>;

    /// Fetch a single invoice by id.
    async fn get(&self, id: i32) -> Result<Option<Invoice>, StoreError>;

    /// List the invoices billed to one company, ordered by id.
    async fn list_for_company(&self, comp_code: &str) -> Result<Vec<Invoice>, StoreError>;

    /// Insert a new invoice; the backend assigns the id.
    async fn insert(&self, invoice: NewInvoice) -> Result<Invoice, StoreError>;

    /// Update an invoice's amount and payment state. The caller decides
    /// `paid_date`; the store writes it verbatim. Returns `None` when no
    /// row matches the id.
    async fn update(
        &self,
        id: i32,
        amt: f64,
        paid: bool,
        paid_date: Option<NaiveDate>,
    ) -> Result<Option<Invoice>, StoreError>;

    /// Delete an invoice by id, returning the number of rows affected.
    async fn delete(&self, id: i32) -> Result<u64, StoreError>;
}

/// Storage operations for industries and their company associations.
#[async_trait]
pub trait IndustryStore: Send + Sync {
    /// List every industry with its associated company codes, computed
    /// in one join and grouped by industry code. Industries with no
    /// associations carry an empty list.
    async fn list_with_companies(&self) -> Result<Vec<IndustryWithCompanies>, StoreError>;

    /// Fetch a single industry by code.
    async fn get(&self, code: &str) -> Result<Option<Industry>, StoreError>;

    /// Insert a new industry. Fails on a duplicate code like
    /// [`CompanyStore::insert`].
    async fn insert(&self, industry: Industry) -> Result<Industry, StoreError>;

    /// Insert a company/industry association row.
    async fn associate_company(
        &self,
        company_code: &str,
        industry_code: &str,
    ) -> Result<(), StoreError>;

    /// List the company codes associated with one industry, ordered by code.
    async fn company_codes(&self, industry_code: &str) -> Result<Vec<String>, StoreError>;
}
