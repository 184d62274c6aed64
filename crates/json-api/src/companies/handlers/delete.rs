//! Delete Company Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{companies::errors::into_status_error, extensions::*, state::State};

/// Delete Company Handler
///
/// Soft-deletes the company and forgets its QuickBooks tokens.
#[endpoint(
    tags("companies"),
    summary = "Delete Company",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Company deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Company not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    company: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .companies
        .delete_company(company.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
