//! Planilla JSON API Healthcheck Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{extensions::*, state::State};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ServiceStatus {
    Ok,

    /// The process is up but the database did not answer.
    Degraded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum DatabaseStatus {
    Reachable,
    Unreachable,
}

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct HealthResponse {
    pub status: ServiceStatus,

    pub database: DatabaseStatus,

    /// Running build version
    pub version: String,
}

/// Healthcheck handler
///
/// Answers 503 while the database is unreachable. QuickBooks is not contacted.
#[endpoint(tags("health"), summary = "Health check endpoint")]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let database = match state.app.database.ping().await {
        Ok(()) => DatabaseStatus::Reachable,
        Err(source) => {
            warn!("healthcheck could not reach the database: {source}");

            DatabaseStatus::Unreachable
        }
    };

    let status = if database == DatabaseStatus::Reachable {
        ServiceStatus::Ok
    } else {
        res.status_code(StatusCode::SERVICE_UNAVAILABLE);

        ServiceStatus::Degraded
    };

    Ok(Json(HealthResponse {
        status,
        database,
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
