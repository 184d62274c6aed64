//! Update Company Profile Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    extensions::*,
    profiles::{errors::into_status_error, handlers::ProfileBody},
    state::State,
};

/// Update Company Profile Handler
///
/// Replaces the whole profile.
#[endpoint(
    tags("profiles"),
    summary = "Save Company Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Profile saved"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid profile"),
        (status_code = StatusCode::NOT_FOUND, description = "Company not found"),
        (status_code = StatusCode::CONFLICT, description = "Company is not connected"),
    ),
)]
pub(crate) async fn handler(
    company: PathParam<Uuid>,
    json: JsonBody<ProfileBody>,
    depot: &mut Depot,
) -> Result<Json<ProfileBody>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let profile = state
        .app
        .profiles
        .save_profile(company.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(profile.into()))
}
