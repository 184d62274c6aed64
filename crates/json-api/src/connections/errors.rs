//! Connection Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use planilla_app::{
    domain::connections::ConnectionsServiceError,
    quickbooks::{QuickBooksError, state::StateError},
};

use crate::{
    companies::errors::into_status_error as company_status_error,
    observability::observe_upstream_failure,
};

pub(crate) fn into_status_error(error: ConnectionsServiceError) -> StatusError {
    match error {
        ConnectionsServiceError::NoToken => {
            StatusError::not_found().brief("Company is not connected to QuickBooks")
        }
        ConnectionsServiceError::MissingRealm => {
            StatusError::conflict().brief("Company is not linked to a QuickBooks realm")
        }
        ConnectionsServiceError::NotFound => {
            StatusError::not_found().brief("Pending connection not found or expired")
        }
        ConnectionsServiceError::MissingCompanyName => {
            StatusError::bad_request().brief("A company name is required")
        }
        ConnectionsServiceError::InvalidState(StateError::Serialization(source)) => {
            error!("failed to encode oauth state: {source}");

            StatusError::internal_server_error()
        }
        ConnectionsServiceError::InvalidState(source) => {
            warn!("rejected oauth state: {source}");

            StatusError::bad_request().brief("Invalid authorization state")
        }
        ConnectionsServiceError::UpstreamAuth(source) => upstream_status_error(&source),
        ConnectionsServiceError::Company(source) => company_status_error(source),
        ConnectionsServiceError::Sql(source) => {
            error!("connection storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn upstream_status_error(source: &QuickBooksError) -> StatusError {
    error!("quickbooks call failed: {source}");

    observe_upstream_failure(match source {
        QuickBooksError::Upstream { status, .. } => Some(*status),
        QuickBooksError::Http(_) | QuickBooksError::Decode(_) | QuickBooksError::InvalidUrl(_) => {
            None
        }
    });

    StatusError::bad_gateway().brief("QuickBooks request failed")
}
