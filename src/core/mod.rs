//! Core module containing the error types, slug derivation, and storage traits

pub mod error;
pub mod slug;
pub mod store;

pub use error::{ApiError, ErrorBody, ErrorDetail, StoreError};
pub use slug::slugify;
pub use store::{CompanyStore, IndustryStore, InvoiceStore};
