//! Close Pay Period Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    pay_periods::{errors::into_status_error, handlers::PayPeriodResponse},
    state::State,
};

/// Close Pay Period Handler
///
/// A closed period rejects further edits, events and runs.
#[endpoint(
    tags("pay-periods"),
    summary = "Close Pay Period",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Pay period closed"),
        (status_code = StatusCode::NOT_FOUND, description = "Pay period not found"),
        (status_code = StatusCode::CONFLICT, description = "Pay period already closed"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    company: PathParam<Uuid>,
    period: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<PayPeriodResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let period = state
        .app
        .pay_periods
        .close_pay_period(company.into_inner().into(), period.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(period.into()))
}
