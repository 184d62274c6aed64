//! Run Pay Period Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    pay_periods::{errors::into_status_error, handlers::run::PayRunResponse},
    state::State,
};

/// Run Pay Period Handler
///
/// Recomputes the run from the period's events, replacing any earlier run.
#[endpoint(
    tags("pay-periods"),
    summary = "Run Pay Period",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Pay run computed"),
        (status_code = StatusCode::NOT_FOUND, description = "Pay period not found"),
        (status_code = StatusCode::CONFLICT, description = "Pay period is closed"),
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
        .run_pay_period(company.into_inner().into(), period.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(PayRunResponse::new(period, items)))
}
