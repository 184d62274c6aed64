//! Pay Item Errors

use salvo::http::StatusError;
use tracing::error;

use planilla_app::domain::pay_items::PayItemsServiceError;

pub(crate) fn into_status_error(error: PayItemsServiceError) -> StatusError {
    match error {
        PayItemsServiceError::AlreadyExists => {
            StatusError::conflict().brief("A pay item with this code already exists")
        }
        PayItemsServiceError::NotFound => StatusError::not_found().brief("Pay item not found"),
        PayItemsServiceError::InvalidReference => {
            StatusError::not_found().brief("Company not found")
        }
        PayItemsServiceError::MissingRequiredData | PayItemsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid pay item payload")
        }
        PayItemsServiceError::Sql(source) => {
            error!("pay item storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
