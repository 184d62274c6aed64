//! Company Profiles
//!
//! Free-form IVA classification answers for a connected QuickBooks company,
//! keyed by realm id and stored wholesale.

pub mod errors;
pub mod memory;
pub mod records;
pub mod service;
pub mod store;

pub use errors::CompanyProfilesError;
pub use memory::InMemoryCompanyProfileStore;
pub use service::*;
pub use store::{CompanyProfileStore, MockCompanyProfileStore, PgCompanyProfileStore};
