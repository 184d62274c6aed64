//! Pay Period Errors

use salvo::http::StatusError;
use tracing::error;

use planilla_app::domain::pay_periods::PayPeriodsServiceError;

pub(crate) fn into_status_error(error: PayPeriodsServiceError) -> StatusError {
    match error {
        PayPeriodsServiceError::AlreadyExists => {
            StatusError::conflict().brief("A pay period with these dates already exists")
        }
        PayPeriodsServiceError::PeriodClosed => {
            StatusError::conflict().brief("Pay period is closed")
        }
        PayPeriodsServiceError::NotFound => StatusError::not_found().brief("Pay period not found"),
        PayPeriodsServiceError::InvalidReference => {
            StatusError::bad_request().brief("Unknown employee or pay item")
        }
        PayPeriodsServiceError::MissingRequiredData | PayPeriodsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid pay period payload")
        }
        PayPeriodsServiceError::Sql(source) => {
            error!("pay period storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
