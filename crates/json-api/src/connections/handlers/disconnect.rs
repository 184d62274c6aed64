//! Disconnect Company Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use planilla_app::domain::connections::records::RevokeOutcome;

use crate::{connections::errors::into_status_error, extensions::*, state::State};

/// What happened to the refresh token upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum RevokeBody {
    Revoked,
    Failed,
    NotConnected,
}

impl From<RevokeOutcome> for RevokeBody {
    fn from(outcome: RevokeOutcome) -> Self {
        match outcome {
            RevokeOutcome::Revoked => Self::Revoked,
            RevokeOutcome::Failed => Self::Failed,
            RevokeOutcome::NotConnected => Self::NotConnected,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DisconnectResponse {
    /// Whether QuickBooks accepted the revocation. Local tokens are removed either way.
    pub revoked: bool,

    pub revoke: RevokeBody,
}

impl From<RevokeOutcome> for DisconnectResponse {
    fn from(outcome: RevokeOutcome) -> Self {
        Self {
            revoked: outcome == RevokeOutcome::Revoked,
            revoke: outcome.into(),
        }
    }
}

/// Disconnect Company Handler
#[endpoint(
    tags("connections"),
    summary = "Disconnect Company from QuickBooks",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Tokens forgotten"),
        (status_code = StatusCode::NOT_FOUND, description = "Company not found"),
    ),
)]
pub(crate) async fn handler(
    company: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<DisconnectResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let outcome = state
        .app
        .connections
        .disconnect(company.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(outcome.into()))
}
