//! Company Errors

use salvo::http::StatusError;
use tracing::error;

use planilla_app::domain::companies::CompaniesServiceError;

pub(crate) fn into_status_error(error: CompaniesServiceError) -> StatusError {
    match error {
        CompaniesServiceError::AlreadyExists => {
            StatusError::conflict().brief("A company with this tax id or realm already exists")
        }
        CompaniesServiceError::NotFound => StatusError::not_found().brief("Company not found"),
        CompaniesServiceError::InvalidPaySplit(total) => {
            StatusError::bad_request().brief(format!("Pay split must total 100, got {total}"))
        }
        CompaniesServiceError::InvalidReference
        | CompaniesServiceError::MissingRequiredData
        | CompaniesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid company payload")
        }
        CompaniesServiceError::Sql(source) => {
            error!("company storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
