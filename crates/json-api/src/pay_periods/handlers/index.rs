//! List Pay Periods Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    pay_periods::{errors::into_status_error, handlers::PayPeriodResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PayPeriodsResponse {
    pub pay_periods: Vec<PayPeriodResponse>,
}

/// List Pay Periods Handler
///
/// Most recent period first.
#[endpoint(
    tags("pay-periods"),
    summary = "List Pay Periods",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Pay periods"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    company: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<PayPeriodsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let periods = state
        .app
        .pay_periods
        .list_pay_periods(company.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(PayPeriodsResponse {
        pay_periods: periods.into_iter().map(Into::into).collect(),
    }))
}
