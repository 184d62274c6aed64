//! Update Pay Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use planilla_app::domain::pay_items::data::PayItemUpdate;

use crate::{
    extensions::*,
    pay_items::{
        errors::into_status_error,
        handlers::{PayItemKindBody, PayItemResponse},
    },
    state::State,
};

/// Update Pay Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdatePayItemRequest {
    pub code: String,
    pub name: String,
    pub kind: PayItemKindBody,
}

impl From<UpdatePayItemRequest> for PayItemUpdate {
    fn from(request: UpdatePayItemRequest) -> Self {
        PayItemUpdate {
            code: request.code,
            name: request.name,
            kind: request.kind.into(),
        }
    }
}

/// Update Pay Item Handler
///
/// Changing the kind leaves already recorded pay events untouched.
#[endpoint(
    tags("pay-items"),
    summary = "Update Pay Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Pay item updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Pay item not found"),
        (status_code = StatusCode::CONFLICT, description = "Code already used in this company"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    company: PathParam<Uuid>,
    item: PathParam<Uuid>,
    json: JsonBody<UpdatePayItemRequest>,
    depot: &mut Depot,
) -> Result<Json<PayItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let item = state
        .app
        .pay_items
        .update_pay_item(
            company.into_inner().into(),
            item.into_inner().into(),
            json.into_inner().into(),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(item.into()))
}
