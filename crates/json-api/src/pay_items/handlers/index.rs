//! List Pay Items Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    pay_items::{errors::into_status_error, handlers::PayItemResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PayItemsResponse {
    pub pay_items: Vec<PayItemResponse>,
}

/// List Pay Items Handler
#[endpoint(
    tags("pay-items"),
    summary = "List Pay Items",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Pay items"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    company: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<PayItemsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let items = state
        .app
        .pay_items
        .list_pay_items(company.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(PayItemsResponse {
        pay_items: items.into_iter().map(Into::into).collect(),
    }))
}
