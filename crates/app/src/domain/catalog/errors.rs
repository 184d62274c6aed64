//! Catalog service errors.

use thiserror::Error;

use crate::{domain::connections::ConnectionsServiceError, quickbooks::errors::QuickBooksError};

#[derive(Debug, Error)]
pub enum CatalogServiceError {
    /// No usable token for the company.
    #[error(transparent)]
    Connection(#[from] ConnectionsServiceError),

    /// The accounting API call failed.
    #[error("quickbooks request failed")]
    Upstream(#[from] QuickBooksError),

    /// `from` is after `to`.
    #[error("date range start is after its end")]
    InvalidRange,
}
