//! List Employees Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    employees::{errors::into_status_error, handlers::EmployeeResponse},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct EmployeesResponse {
    pub employees: Vec<EmployeeResponse>,
}

/// List Employees Handler
#[endpoint(
    tags("employees"),
    summary = "List Employees",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Employees"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    company: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<EmployeesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let employees = state
        .app
        .employees
        .list_employees(company.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(EmployeesResponse {
        employees: employees.into_iter().map(Into::into).collect(),
    }))
}
