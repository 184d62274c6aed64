//! Delete Pay Period Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, pay_periods::errors::into_status_error, state::State};

/// Delete Pay Period Handler
///
/// Only open periods can be deleted.
#[endpoint(
    tags("pay-periods"),
    summary = "Delete Pay Period",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Pay period deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Pay period not found"),
        (status_code = StatusCode::CONFLICT, description = "Pay period is closed"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    company: PathParam<Uuid>,
    period: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .pay_periods
        .delete_pay_period(company.into_inner().into(), period.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
