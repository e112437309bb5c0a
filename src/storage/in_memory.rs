//! In-memory implementation of the storage traits for testing and development
//!
//! Mirrors the constraints the SQL schema enforces: unique company and
//! industry codes, a serial invoice id, and a composite primary key on
//! the association table. Uses `RwLock` for thread-safe access.

use crate::core::error::StoreError;
use crate::core::store::{CompanyStore, IndustryStore, InvoiceStore};
use crate::entities::{Company, Industry, IndustryWithCompanies, Invoice, NewInvoice};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Tables {
    companies: Vec<Company>,
    invoices: Vec<Invoice>,
    industries: Vec<Industry>,
    /// `(company_code, industry_code)` association rows.
    links: Vec<(String, String)>,
    next_invoice_id: i32,
}

/// In-memory store implementing all three storage traits.
#[derive(Clone)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    /// Create a new, empty in-memory store.
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables {
                next_invoice_id: 1,
                ..Tables::default()
            })),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables
            .read()
            .map_err(|e| StoreError::Backend(format!("failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, StoreError> {
        self.tables
            .write()
            .map_err(|e| StoreError::Backend(format!("failed to acquire write lock: {}", e)))
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompanyStore for InMemoryStore {
    async fn list(&self) -> Result<Vec<Company>, StoreError> {
        let tables = self.read()?;

        let mut companies = tables.companies.clone();
        companies.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(companies)
    }

    async fn get(&self, code: &str) -> Result<Option<Company>, StoreError> {
        let tables = self.read()?;
        Ok(tables.companies.iter().find(|c| c.code == code).cloned())
    }

    async fn get_with_industries(
        &self,
        code: &str,
    ) -> Result<Option<(Company, Vec<String>)>, StoreError> {
        let tables = self.read()?;

        let Some(company) = tables.companies.iter().find(|c| c.code == code) else {
            return Ok(None);
        };

        let mut industries: Vec<String> = tables
            .links
            .iter()
            .filter(|(company_code, _)| company_code == code)
            .filter_map(|(_, industry_code)| {
                tables
                    .industries
                    .iter()
                    .find(|i| &i.code == industry_code)
                    .map(|i| i.industry.clone())
            })
            .collect();
        industries.sort();

        Ok(Some((company.clone(), industries)))
    }

    async fn insert(&self, company: Company) -> Result<Company, StoreError> {
        let mut tables = self.write()?;

        if tables.companies.iter().any(|c| c.code == company.code) {
            return Err(StoreError::Duplicate(format!(
                "companies.code '{}'",
                company.code
            )));
        }

        tables.companies.push(company.clone());
        Ok(company)
    }

    async fn update(
        &self,
        code: &str,
        name: &str,
        description: &str,
    ) -> Result<Option<Company>, StoreError> {
        let mut tables = self.write()?;

        let Some(company) = tables.companies.iter_mut().find(|c| c.code == code) else {
            return Ok(None);
        };

        company.name = name.to_string();
        company.description = description.to_string();
        Ok(Some(company.clone()))
    }

    async fn delete(&self, code: &str) -> Result<u64, StoreError> {
        let mut tables = self.write()?;

        let before = tables.companies.len();
        tables.companies.retain(|c| c.code != code);
        let affected = (before - tables.companies.len()) as u64;

        if affected > 0 {
            // ON DELETE CASCADE on invoices and association rows.
            tables.invoices.retain(|i| i.comp_code != code);
            tables.links.retain(|(company_code, _)| company_code != code);
        }

        Ok(affected)
    }
}

#[async_trait]
impl InvoiceStore for InMemoryStore {
    async fn list(&self) -> Result<Vec<Invoice>, StoreError> {
        let tables = self.read()?;

        let mut invoices = tables.invoices.clone();
        invoices.sort_by_key(|i| i.id);
        Ok(invoices)
    }

    async fn get(&self, id: i32) -> Result<Option<Invoice>, StoreError> {
        let tables = self.read()?;
        Ok(tables.invoices.iter().find(|i| i.id == id).cloned())
    }

    async fn list_for_company(&self, comp_code: &str) -> Result<Vec<Invoice>, StoreError> {
        let tables = self.read()?;

        let mut invoices: Vec<Invoice> = tables
            .invoices
            .iter()
            .filter(|i| i.comp_code == comp_code)
            .cloned()
            .collect();
        invoices.sort_by_key(|i| i.id);
        Ok(invoices)
    }

    async fn insert(&self, invoice: NewInvoice) -> Result<Invoice, StoreError> {
        let mut tables = self.write()?;

        let id = tables.next_invoice_id;
        tables.next_invoice_id += 1;

        let invoice = Invoice {
            id,
            comp_code: invoice.comp_code,
            amt: invoice.amt,
            paid: invoice.paid,
            add_date: invoice.add_date,
            paid_date: invoice.paid_date,
        };
        tables.invoices.push(invoice.clone());
        Ok(invoice)
    }

    async fn update(
        &self,
        id: i32,
        amt: f64,
        paid: bool,
        paid_date: Option<NaiveDate>,
    ) -> Result<Option<Invoice>, StoreError> {
        let mut tables = self.write()?;

        let Some(invoice) = tables.invoices.iter_mut().find(|i| i.id == id) else {
            return Ok(None);
        };

        invoice.amt = amt;
        invoice.paid = paid;
        invoice.paid_date = paid_date;
        Ok(Some(invoice.clone()))
    }

    async fn delete(&self, id: i32) -> Result<u64, StoreError> {
        let mut tables = self.write()?;

        let before = tables.invoices.len();
        tables.invoices.retain(|i| i.id != id);
        Ok((before - tables.invoices.len()) as u64)
    }
}

#[async_trait]
impl IndustryStore for InMemoryStore {
    async fn list_with_companies(&self) -> Result<Vec<IndustryWithCompanies>, StoreError> {
        let tables = self.read()?;

        let mut industries: Vec<IndustryWithCompanies> = tables
            .industries
            .iter()
            .map(|industry| {
                let mut company_codes: Vec<String> = tables
                    .links
                    .iter()
                    .filter(|(_, industry_code)| industry_code == &industry.code)
                    .map(|(company_code, _)| company_code.clone())
                    .collect();
                company_codes.sort();

                IndustryWithCompanies {
                    code: industry.code.clone(),
                    industry: industry.industry.clone(),
                    company_codes,
                }
            })
            .collect();
        industries.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(industries)
    }

    async fn get(&self, code: &str) -> Result<Option<Industry>, StoreError> {
        let tables = self.read()?;
        Ok(tables.industries.iter().find(|i| i.code == code).cloned())
    }

    async fn insert(&self, industry: Industry) -> Result<Industry, StoreError> {
        let mut tables = self.write()?;

        if tables.industries.iter().any(|i| i.code == industry.code) {
            return Err(StoreError::Duplicate(format!(
                "industries.code '{}'",
                industry.code
            )));
        }

        tables.industries.push(industry.clone());
        Ok(industry)
    }

    async fn associate_company(
        &self,
        company_code: &str,
        industry_code: &str,
    ) -> Result<(), StoreError> {
        let mut tables = self.write()?;

        let link = (company_code.to_string(), industry_code.to_string());
        if tables.links.contains(&link) {
            return Err(StoreError::Duplicate(format!(
                "companies_industries ('{}', '{}')",
                company_code, industry_code
            )));
        }

        tables.links.push(link);
        Ok(())
    }

    async fn company_codes(&self, industry_code: &str) -> Result<Vec<String>, StoreError> {
        let tables = self.read()?;

        let mut codes: Vec<String> = tables
            .links
            .iter()
            .filter(|(_, code)| code == industry_code)
            .map(|(company_code, _)| company_code.clone())
            .collect();
        codes.sort();
        Ok(codes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    // InMemoryStore implements all three traits, so calls go through the
    // trait to stay unambiguous.

    fn company(code: &str) -> Company {
        Company {
            code: code.to_string(),
            name: code.to_uppercase(),
            description: format!("{} description", code),
        }
    }

    fn industry(code: &str, name: &str) -> Industry {
        Industry {
            code: code.to_string(),
            industry: name.to_string(),
        }
    }

    fn new_invoice(comp_code: &str, amt: f64) -> NewInvoice {
        NewInvoice {
            comp_code: comp_code.to_string(),
            amt,
            paid: false,
            add_date: Utc::now().date_naive(),
            paid_date: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_list_companies() {
        let store = InMemoryStore::new();

        CompanyStore::insert(&store, company("ibm")).await.unwrap();
        CompanyStore::insert(&store, company("acme")).await.unwrap();

        let companies = CompanyStore::list(&store).await.unwrap();
        assert_eq!(companies.len(), 2);
        assert_eq!(companies[0].code, "acme");
        assert_eq!(companies[1].code, "ibm");
    }

    #[tokio::test]
    async fn test_duplicate_company_code_rejected() {
        let store = InMemoryStore::new();

        CompanyStore::insert(&store, company("acme")).await.unwrap();
        let err = CompanyStore::insert(&store, company("acme")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_get_with_industries_collects_names() {
        let store = InMemoryStore::new();
        CompanyStore::insert(&store, company("acme")).await.unwrap();
        IndustryStore::insert(&store, industry("tech", "Technology"))
            .await
            .unwrap();
        store.associate_company("acme", "tech").await.unwrap();

        let (found, industries) = store.get_with_industries("acme").await.unwrap().unwrap();
        assert_eq!(found.code, "acme");
        assert_eq!(industries, vec!["Technology".to_string()]);
    }

    #[tokio::test]
    async fn test_get_with_industries_empty_when_unassociated() {
        let store = InMemoryStore::new();
        CompanyStore::insert(&store, company("acme")).await.unwrap();

        let (_, industries) = store.get_with_industries("acme").await.unwrap().unwrap();
        assert!(industries.is_empty());
    }

    #[tokio::test]
    async fn test_invoice_ids_are_serial() {
        let store = InMemoryStore::new();
        CompanyStore::insert(&store, company("acme")).await.unwrap();

        let first = InvoiceStore::insert(&store, new_invoice("acme", 100.0))
            .await
            .unwrap();
        let second = InvoiceStore::insert(&store, new_invoice("acme", 200.0))
            .await
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_delete_reports_affected_rows() {
        let store = InMemoryStore::new();
        CompanyStore::insert(&store, company("acme")).await.unwrap();

        assert_eq!(CompanyStore::delete(&store, "acme").await.unwrap(), 1);
        assert_eq!(CompanyStore::delete(&store, "acme").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_company_delete_cascades() {
        let store = InMemoryStore::new();
        CompanyStore::insert(&store, company("acme")).await.unwrap();
        IndustryStore::insert(&store, industry("tech", "Technology"))
            .await
            .unwrap();
        store.associate_company("acme", "tech").await.unwrap();
        InvoiceStore::insert(&store, new_invoice("acme", 50.0))
            .await
            .unwrap();

        CompanyStore::delete(&store, "acme").await.unwrap();

        assert!(InvoiceStore::list(&store).await.unwrap().is_empty());
        assert!(store.company_codes("tech").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_association_rejected() {
        let store = InMemoryStore::new();
        CompanyStore::insert(&store, company("acme")).await.unwrap();
        IndustryStore::insert(&store, industry("tech", "Technology"))
            .await
            .unwrap();

        store.associate_company("acme", "tech").await.unwrap();
        let err = store.associate_company("acme", "tech").await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_list_with_companies_groups_codes() {
        let store = InMemoryStore::new();
        CompanyStore::insert(&store, company("acme")).await.unwrap();
        CompanyStore::insert(&store, company("ibm")).await.unwrap();
        IndustryStore::insert(&store, industry("tech", "Technology"))
            .await
            .unwrap();
        IndustryStore::insert(&store, industry("mfg", "Manufacturing"))
            .await
            .unwrap();
        store.associate_company("acme", "tech").await.unwrap();
        store.associate_company("ibm", "tech").await.unwrap();

        let industries = store.list_with_companies().await.unwrap();
        assert_eq!(industries.len(), 2);
        // Ordered by industry code; unassociated industries carry an empty list.
        assert_eq!(industries[0].code, "mfg");
        assert!(industries[0].company_codes.is_empty());
        assert_eq!(industries[1].code, "tech");
        assert_eq!(
            industries[1].company_codes,
            vec!["acme".to_string(), "ibm".to_string()]
        );
    }
}
