//! OAuth Callback Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, prelude::*};
use tracing::{info, warn};

use planilla_app::domain::connections::{
    ConnectionsServiceError, records::AuthorizationOutcome,
};

use crate::{connections::errors::into_status_error, extensions::*, state::State};

/// OAuth Callback Handler
///
/// Target of the provider redirect. Stores the tokens and sends the browser
/// back to the return path carried in `state`, adding `pending=<token>` when
/// the realm still needs a company.
#[endpoint(
    tags("connections"),
    summary = "Complete QuickBooks Authorization",
    responses(
        (status_code = StatusCode::FOUND, description = "Redirect to the return path"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid callback parameters"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Token exchange failed"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    if let Some(error) = req.query::<String>("error") {
        warn!(%error, "authorization was not granted");

        return Err(StatusError::bad_request().brief("Authorization was not granted"));
    }

    let code = required_query(req, "code")?;
    let oauth_state = required_query(req, "state")?;
    let realm_id = required_query(req, "realmId")?;

    let outcome = state
        .app
        .connections
        .complete_authorization(&code, &oauth_state, &realm_id)
        .await
        .map_err(|error| match error {
            ConnectionsServiceError::MissingRealm => {
                StatusError::bad_request().brief("Missing realmId")
            }
            other => into_status_error(other),
        })?;

    let location = match outcome {
        AuthorizationOutcome::Connected {
            company,
            return_path,
        } => {
            info!(%company, %realm_id, "quickbooks connected");

            return_path
        }
        AuthorizationOutcome::Pending { token, return_path } => {
            info!(%realm_id, "quickbooks connection pending");

            with_query(&return_path, "pending", &token)
        }
    };

    res.add_header(LOCATION, location, true)
        .or_500("failed to set location header")?;

    Ok(StatusCode::FOUND)
}

fn required_query(req: &Request, name: &str) -> Result<String, StatusError> {
    req.query::<String>(name)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| StatusError::bad_request().brief(format!("Missing {name}")))
}

fn with_query(path: &str, key: &str, value: &str) -> String {
    let separator = if path.contains('?') { '&' } else { '?' };

    format!("{path}{separator}{key}={value}")
}
