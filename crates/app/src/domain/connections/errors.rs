//! Connections service errors.

use thiserror::Error;

use crate::{
    domain::companies::CompaniesServiceError,
    quickbooks::{errors::QuickBooksError, state::StateError},
};

/// Connection lifecycle error variants.
#[derive(Debug, Error)]
pub enum ConnectionsServiceError {
    /// The company has never been connected, or was disconnected.
    #[error("company has no stored QuickBooks token")]
    NoToken,

    /// The company is not linked to a QuickBooks realm.
    #[error("company is not linked to a QuickBooks realm")]
    MissingRealm,

    /// Pending connection is unknown or expired.
    #[error("pending connection not found")]
    NotFound,

    /// Neither the operator nor QuickBooks supplied a company name.
    #[error("company name is required")]
    MissingCompanyName,

    /// The OAuth `state` could not be trusted.
    #[error("invalid oauth state")]
    InvalidState(#[from] StateError),

    /// QuickBooks rejected a token call.
    #[error("quickbooks authorization failed")]
    UpstreamAuth(#[from] QuickBooksError),

    #[error(transparent)]
    Company(#[from] CompaniesServiceError),

    /// Underlying SQL/storage error.
    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}
