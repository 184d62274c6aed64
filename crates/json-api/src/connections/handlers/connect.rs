//! Connect Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::QueryParam, prelude::*};
use uuid::Uuid;

use crate::{connections::errors::into_status_error, extensions::*, state::State};

const DEFAULT_RETURN_PATH: &str = "/";

/// Connect Handler
///
/// Redirects to the QuickBooks consent screen. `company` reconnects an
/// existing company; without it the realm becomes a pending connection
/// unless a company already owns it.
#[endpoint(
    tags("connections"),
    summary = "Start QuickBooks Authorization",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::FOUND, description = "Redirect to the provider"),
        (status_code = StatusCode::BAD_REQUEST, description = "Return path is not site-relative"),
    ),
)]
pub(crate) async fn handler(
    return_path: QueryParam<String, false>,
    company: QueryParam<Uuid, false>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let return_path = return_path
        .into_inner()
        .unwrap_or_else(|| DEFAULT_RETURN_PATH.to_owned());

    let url = state
        .app
        .connections
        .authorization_url(&return_path, company.into_inner().map(Into::into))
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, url, true)
        .or_500("failed to set location header")?;

    Ok(StatusCode::FOUND)
}
