//! Catalog Errors

use salvo::http::StatusError;

use planilla_app::domain::catalog::CatalogServiceError;

use crate::connections::errors::{into_status_error as connection_status_error, upstream_status_error};

pub(crate) fn into_status_error(error: CatalogServiceError) -> StatusError {
    match error {
        CatalogServiceError::Connection(source) => connection_status_error(source),
        CatalogServiceError::Upstream(source) => upstream_status_error(&source),
        CatalogServiceError::InvalidRange => {
            StatusError::bad_request().brief("\"from\" must not be after \"to\"")
        }
    }
}
