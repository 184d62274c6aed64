//! Get Pay Run Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    pay_periods::{errors::into_status_error, handlers::run::PayRunResponse},
    state::State,
};

/// Get Pay Run Handler
///
/// Returns the last computed run; empty when the period was never run.
#[endpoint(
    tags("pay-periods"),
    summary = "Get Pay Run",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Pay run"),
        (status_code = StatusCode::NOT_FOUND, description = "Pay period not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    company: PathParam<Uuid>,
    period: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<PayRunResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let period = period.into_inner();

    let items = state
        .app
        .pay_periods
        .get_pay_run(company.into_inner().into(), period.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(PayRunResponse::new(period, items)))
}
