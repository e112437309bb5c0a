//! PostgreSQL storage backend using sqlx
//!
//! `PgStore` implements all three storage traits against a shared
//! `sqlx::PgPool`. Every trait method issues exactly one parameterized
//! statement; writes use `RETURNING` so the inserted/updated row comes
//! back without a second round trip. Uniqueness and referential
//! integrity are enforced by the schema in `migrations/`, not here.

use crate::core::error::StoreError;
use crate::core::store::{CompanyStore, IndustryStore, InvoiceStore};
use crate::entities::{Company, Industry, IndustryWithCompanies, Invoice, NewInvoice};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

/// Storage service backed by PostgreSQL.
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create a new `PgStore` with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Row shape for the company/industries LEFT JOIN: `industry` is NULL
/// when the company has no associations.
#[derive(sqlx::FromRow)]
struct CompanyIndustryRow {
    code: String,
    name: String,
    description: String,
    industry: Option<String>,
}

/// Row shape for the industries/companies LEFT JOIN.
#[derive(sqlx::FromRow)]
struct IndustryCompanyRow {
    code: String,
    industry: String,
    company_code: Option<String>,
}

#[async_trait]
impl CompanyStore for PgStore {
    async fn list(&self) -> Result<Vec<Company>, StoreError> {
        let companies = sqlx::query_as::<_, Company>(
            "SELECT code, name, description FROM companies ORDER BY code",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(companies)
    }

    async fn get(&self, code: &str) -> Result<Option<Company>, StoreError> {
        let company = sqlx::query_as::<_, Company>(
            "SELECT code, name, description FROM companies WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(company)
    }

    async fn get_with_industries(
        &self,
        code: &str,
    ) -> Result<Option<(Company, Vec<String>)>, StoreError> {
        let rows = sqlx::query_as::<_, CompanyIndustryRow>(
            "SELECT c.code, c.name, c.description, i.industry
             FROM companies c
             LEFT JOIN companies_industries ci ON ci.company_code = c.code
             LEFT JOIN industries i ON i.code = ci.industry_code
             WHERE c.code = $1
             ORDER BY i.industry",
        )
        .bind(code)
        .fetch_all(&self.pool)
        .await?;

        let Some(first) = rows.first() else {
            return Ok(None);
        };

        let company = Company {
            code: first.code.clone(),
            name: first.name.clone(),
            description: first.description.clone(),
        };
        let industries = rows.into_iter().filter_map(|row| row.industry).collect();

        Ok(Some((company, industries)))
    }

    async fn insert(&self, company: Company) -> Result<Company, StoreError> {
        let inserted = sqlx::query_as::<_, Company>(
            "INSERT INTO companies (code, name, description)
             VALUES ($1, $2, $3)
             RETURNING code, name, description",
        )
        .bind(&company.code)
        .bind(&company.name)
        .bind(&company.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(inserted)
    }

    async fn update(
        &self,
        code: &str,
        name: &str,
        description: &str,
    ) -> Result<Option<Company>, StoreError> {
        let updated = sqlx::query_as::<_, Company>(
            "UPDATE companies SET name = $1, description = $2
             WHERE code = $3
             RETURNING code, name, description",
        )
        .bind(name)
        .bind(description)
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete(&self, code: &str) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM companies WHERE code = $1")
            .bind(code)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl InvoiceStore for PgStore {
    async fn list(&self) -> Result<Vec<Invoice>, StoreError> {
        let invoices = sqlx::query_as::<_, Invoice>(
            "SELECT id, comp_code, amt, paid, add_date, paid_date FROM invoices ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(invoices)
    }

    async fn get(&self, id: i32) -> Result<Option<Invoice>, StoreError> {
        let invoice = sqlx::query_as::<_, Invoice>(
            "SELECT id, comp_code, amt, paid, add_date, paid_date FROM invoices WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invoice)
    }

    async fn list_for_company(&self, comp_code: &str) -> Result<Vec<Invoice>, StoreError> {
        let invoices = sqlx::query_as::<_, Invoice>(
            "SELECT id, comp_code, amt, paid, add_date, paid_date
             FROM invoices
             WHERE comp_code = $1
             ORDER BY id",
        )
        .bind(comp_code)
        .fetch_all(&self.pool)
        .await?;

        Ok(invoices)
    }

    async fn insert(&self, invoice: NewInvoice) -> Result<Invoice, StoreError> {
        let inserted = sqlx::query_as::<_, Invoice>(
            "INSERT INTO invoices (comp_code, amt, paid, add_date, paid_date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, comp_code, amt, paid, add_date, paid_date",
        )
        .bind(&invoice.comp_code)
        .bind(invoice.amt)
        .bind(invoice.paid)
        .bind(invoice.add_date)
        .bind(invoice.paid_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(inserted)
    }

    async fn update(
        &self,
        id: i32,
        amt: f64,
        paid: bool,
        paid_date: Option<NaiveDate>,
    ) -> Result<Option<Invoice>, StoreError> {
        let updated = sqlx::query_as::<_, Invoice>(
            "UPDATE invoices SET amt = $1, paid = $2, paid_date = $3
             WHERE id = $4
             RETURNING id, comp_code, amt, paid, add_date, paid_date",
        )
        .bind(amt)
        .bind(paid)
        .bind(paid_date)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl IndustryStore for PgStore {
    async fn list_with_companies(&self) -> Result<Vec<IndustryWithCompanies>, StoreError> {
        // One join across all industries, grouped in application code.
        let rows = sqlx::query_as::<_, IndustryCompanyRow>(
            "SELECT i.code, i.industry, ci.company_code
             FROM industries i
             LEFT JOIN companies_industries ci ON ci.industry_code = i.code
             ORDER BY i.code, ci.company_code",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut industries: Vec<IndustryWithCompanies> = Vec::new();
        for row in rows {
            match industries.last_mut() {
                Some(last) if last.code == row.code => {
                    last.company_codes.extend(row.company_code);
                }
                _ => industries.push(IndustryWithCompanies {
                    code: row.code,
                    industry: row.industry,
                    company_codes: row.company_code.into_iter().collect(),
                }),
            }
        }

        Ok(industries)
    }

    async fn get(&self, code: &str) -> Result<Option<Industry>, StoreError> {
        let industry = sqlx::query_as::<_, Industry>(
            "SELECT code, industry FROM industries WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(industry)
    }

    async fn insert(&self, industry: Industry) -> Result<Industry, StoreError> {
        let inserted = sqlx::query_as::<_, Industry>(
            "INSERT INTO industries (code, industry)
             VALUES ($1, $2)
             RETURNING code, industry",
        )
        .bind(&industry.code)
        .bind(&industry.industry)
        .fetch_one(&self.pool)
        .await?;

        Ok(inserted)
    }

    async fn associate_company(
        &self,
        company_code: &str,
        industry_code: &str,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO companies_industries (company_code, industry_code) VALUES ($1, $2)",
        )
        .bind(company_code)
        .bind(industry_code)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn company_codes(&self, industry_code: &str) -> Result<Vec<String>, StoreError> {
        let codes = sqlx::query_scalar::<_, String>(
            "SELECT company_code FROM companies_industries
             WHERE industry_code = $1
             ORDER BY company_code",
        )
        .bind(industry_code)
        .fetch_all(&self.pool)
        .await?;

        Ok(codes)
    }
}
