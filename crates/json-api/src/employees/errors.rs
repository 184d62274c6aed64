//! Employee Errors

use salvo::http::StatusError;
use tracing::error;

use planilla_app::domain::employees::EmployeesServiceError;

pub(crate) fn into_status_error(error: EmployeesServiceError) -> StatusError {
    match error {
        EmployeesServiceError::AlreadyExists => StatusError::conflict()
            .brief("An employee with this national id already exists in the company"),
        EmployeesServiceError::NotFound => StatusError::not_found().brief("Employee not found"),
        EmployeesServiceError::InvalidReference => {
            StatusError::not_found().brief("Company not found")
        }
        EmployeesServiceError::MissingRequiredData | EmployeesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid employee payload")
        }
        EmployeesServiceError::Sql(source) => {
            error!("employee storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
