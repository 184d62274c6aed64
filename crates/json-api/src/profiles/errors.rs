//! Profile Errors

use salvo::http::StatusError;
use tracing::error;

use planilla_app::domain::profiles::CompanyProfilesError;

use crate::companies::errors::into_status_error as company_status_error;

pub(crate) fn into_status_error(error: CompanyProfilesError) -> StatusError {
    match error {
        CompanyProfilesError::InvalidProrata(percentage) => StatusError::bad_request().brief(
            format!("Prorata percentage must be between 0 and 100, got {percentage}"),
        ),
        CompanyProfilesError::MissingRealm => {
            StatusError::conflict().brief("Company is not linked to a QuickBooks realm")
        }
        CompanyProfilesError::Company(source) => company_status_error(source),
        CompanyProfilesError::Decode(source) => {
            error!("stored company profile is unreadable: {source}");

            StatusError::internal_server_error()
        }
        CompanyProfilesError::Sql(source) => {
            error!("company profile storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
