//! Get Company Profile Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    profiles::{errors::into_status_error, handlers::ProfileBody},
    state::State,
};

/// Get Company Profile Handler
///
/// Returns the saved profile, or the default one when none was saved.
#[endpoint(
    tags("profiles"),
    summary = "Get Company Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Company profile"),
        (status_code = StatusCode::NOT_FOUND, description = "Company not found"),
        (status_code = StatusCode::CONFLICT, description = "Company is not connected"),
    ),
)]
pub(crate) async fn handler(
    company: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProfileBody>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let profile = state
        .app
        .profiles
        .load_profile(company.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(profile.into()))
}
