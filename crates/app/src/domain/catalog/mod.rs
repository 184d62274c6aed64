//! Catalog
//!
//! Read-only views over a connected company's QuickBooks data, with tax rates
//! classified into IVA tariffs.

pub mod errors;
pub mod records;
pub mod service;

pub use errors::CatalogServiceError;
pub use service::*;
