//! Delete Employee Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{employees::errors::into_status_error, extensions::*, state::State};

/// Delete Employee Handler
#[endpoint(
    tags("employees"),
    summary = "Delete Employee",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Employee deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Employee not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    company: PathParam<Uuid>,
    employee: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .employees
        .delete_employee(company.into_inner().into(), employee.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
