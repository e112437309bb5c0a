//! Entity types for the three resources and their request/response shapes

pub mod company;
pub mod industry;
pub mod invoice;

pub use company::{Company, CompanyDetail, CompanyInput};
pub use industry::{AssociateCompanyInput, Industry, IndustryInput, IndustryWithCompanies};
pub use invoice::{Invoice, InvoiceDetail, InvoiceInput, InvoiceUpdateInput, NewInvoice};
