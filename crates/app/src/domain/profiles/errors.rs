//! Company profile errors.

use thiserror::Error;

use crate::domain::companies::CompaniesServiceError;

#[derive(Debug, Error)]
pub enum CompanyProfilesError {
    #[error("prorata percentage must be between 0 and 100, got {0}")]
    InvalidProrata(f64),

    /// Profiles are keyed by realm; a disconnected company has none.
    #[error("company is not linked to a QuickBooks realm")]
    MissingRealm,

    /// The stored blob no longer matches the profile shape.
    #[error("stored profile could not be decoded")]
    Decode(#[source] serde_json::Error),

    #[error(transparent)]
    Company(#[from] CompaniesServiceError),

    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}
