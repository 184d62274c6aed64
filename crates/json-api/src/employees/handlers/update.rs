//! Update Employee Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    employees::{
        errors::into_status_error,
        handlers::{EmployeeFields, EmployeeResponse},
    },
    extensions::*,
    state::State,
};

/// Update Employee Handler
///
/// Replaces every editable field. Setting `terminated_on` records a
/// termination; the employee stays listed until deleted.
#[endpoint(
    tags("employees"),
    summary = "Update Employee",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Employee updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Employee not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    company: PathParam<Uuid>,
    employee: PathParam<Uuid>,
    json: JsonBody<EmployeeFields>,
    depot: &mut Depot,
) -> Result<Json<EmployeeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let update = json.into_inner().into_update()?;

    let employee = state
        .app
        .employees
        .update_employee(
            company.into_inner().into(),
            employee.into_inner().into(),
            update,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(employee.into()))
}
