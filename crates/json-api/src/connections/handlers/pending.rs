//! Get Pending Connection Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use planilla_app::domain::connections::records::PendingConnection;

use crate::{connections::errors::into_status_error, extensions::*, state::State};

/// A realm waiting to be attached to a new company. Tokens are never exposed.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PendingConnectionResponse {
    pub realm_id: String,

    /// Name QuickBooks reported for the realm, when available
    pub company_name: Option<String>,

    pub return_path: String,
    pub created_at: String,

    /// After this the connection is gone and consent must be repeated
    pub expires_at: String,
}

impl From<PendingConnection> for PendingConnectionResponse {
    fn from(pending: PendingConnection) -> Self {
        Self {
            realm_id: pending.realm_id,
            company_name: pending.company_name,
            return_path: pending.return_path,
            created_at: pending.created_at.to_string(),
            expires_at: pending.expires_at.to_string(),
        }
    }
}

/// Get Pending Connection Handler
#[endpoint(
    tags("connections"),
    summary = "Get Pending Connection",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Pending connection"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown or expired"),
    ),
)]
pub(crate) async fn handler(
    token: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<PendingConnectionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let pending = state
        .app
        .connections
        .pending_connection(&token.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(pending.into()))
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, Timestamp};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use planilla_app::{
        domain::connections::ConnectionsServiceError, quickbooks::TokenGrant,
    };

    use crate::test_helpers::Mocks;

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.serve(Router::with_path("pending-connections/{token}").get(handler))
    }

    #[tokio::test]
    async fn test_pending_connection_hides_tokens() -> TestResult {
        let now = Timestamp::now();
        let mut mocks = Mocks::default();

        mocks
            .connections
            .expect_pending_connection()
            .once()
            .withf(|token| token == "ab12")
            .return_once(move |token| {
                Ok(PendingConnection {
                    token: token.to_string(),
                    realm_id: "9130350000000001".to_string(),
                    company_name: Some("Soda La Esquina".to_string()),
                    return_path: "/".to_string(),
                    grant: TokenGrant {
                        access_token: "access-secret".to_string(),
                        refresh_token: "refresh-secret".to_string(),
                        token_type: "bearer".to_string(),
                        scope: None,
                        expires_at: now + SignedDuration::from_hours(1),
                        refresh_token_expires_at: None,
                    },
                    created_at: now,
                    expires_at: now + SignedDuration::from_mins(15),
                })
            });

        let mut res = TestClient::get("http://example.com/pending-connections/ab12")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body = res.take_string().await?;

        assert!(body.contains("Soda La Esquina"), "expected company name in {body}");
        assert!(!body.contains("secret"), "tokens leaked in {body}");

        Ok(())
    }

    #[tokio::test]
    async fn test_expired_pending_connection_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .connections
            .expect_pending_connection()
            .once()
            .return_once(|_| Err(ConnectionsServiceError::NotFound));

        let res = TestClient::get("http://example.com/pending-connections/gone")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
