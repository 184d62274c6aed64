//! Delete Pay Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, pay_items::errors::into_status_error, state::State};

/// Delete Pay Item Handler
#[endpoint(
    tags("pay-items"),
    summary = "Delete Pay Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Pay item deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Pay item not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    company: PathParam<Uuid>,
    item: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .pay_items
        .delete_pay_item(company.into_inner().into(), item.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
