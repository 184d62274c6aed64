//! List Pay Events Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    pay_periods::{errors::into_status_error, handlers::events::PayEventResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PayEventsResponse {
    pub pay_events: Vec<PayEventResponse>,
}

/// List Pay Events Handler
#[endpoint(
    tags("pay-periods"),
    summary = "List Pay Events",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Pay events"),
        (status_code = StatusCode::NOT_FOUND, description = "Pay period not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    company: PathParam<Uuid>,
    period: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<PayEventsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let events = state
        .app
        .pay_periods
        .list_pay_events(company.into_inner().into(), period.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(PayEventsResponse {
        pay_events: events.into_iter().map(Into::into).collect(),
    }))
}
