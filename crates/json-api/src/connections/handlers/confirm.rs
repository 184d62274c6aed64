//! Confirm Pending Connection Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use planilla_app::domain::connections::records::ConfirmPending;

use crate::{
    companies::get::CompanyResponse, connections::errors::into_status_error, extensions::*,
    state::State,
};

/// Confirm Pending Connection Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ConfirmPendingRequest {
    /// Overrides the name QuickBooks reported
    #[serde(default)]
    pub name: Option<String>,

    pub tax_id: String,
}

impl From<ConfirmPendingRequest> for ConfirmPending {
    fn from(request: ConfirmPendingRequest) -> Self {
        ConfirmPending {
            name: request
                .name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
            tax_id: request.tax_id,
        }
    }
}

/// Confirm Pending Connection Handler
///
/// Creates a company linked to the pending realm and stores its tokens.
#[endpoint(
    tags("connections"),
    summary = "Confirm Pending Connection",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Company created and connected"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown or expired"),
        (status_code = StatusCode::CONFLICT, description = "Company already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    token: PathParam<String>,
    json: JsonBody<ConfirmPendingRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CompanyResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let company = state
        .app
        .connections
        .confirm_pending(&token.into_inner(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/companies/{}", company.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(company.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use planilla_app::domain::{
        companies::{
            CompaniesServiceError,
            records::{CompanyRecord, CompanyUuid},
        },
        connections::ConnectionsServiceError,
    };

    use crate::test_helpers::{Mocks, make_company};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.serve(Router::with_path("pending-connections/{token}/confirm").post(handler))
    }

    #[tokio::test]
    async fn test_confirm_creates_connected_company() -> TestResult {
        let uuid = CompanyUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .connections
            .expect_confirm_pending()
            .once()
            .withf(|token, confirm| {
                token == "ab12"
                    && *confirm
                        == ConfirmPending {
                            name: None,
                            tax_id: "3-101-000001".to_string(),
                        }
            })
            .return_once(move |_, _| {
                Ok(CompanyRecord {
                    realm_id: Some("9130350000000001".to_string()),
                    ..make_company(uuid)
                })
            });

        let mut res = TestClient::post("http://example.com/pending-connections/ab12/confirm")
            .json(&json!({ "name": "  ", "tax_id": "3-101-000001" }))
            .send(&make_service(mocks))
            .await;

        let body: CompanyResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/companies/{uuid}").as_str()));
        assert_eq!(body.realm_id.as_deref(), Some("9130350000000001"));

        Ok(())
    }

    #[tokio::test]
    async fn test_confirm_without_any_name_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .connections
            .expect_confirm_pending()
            .once()
            .return_once(|_, _| Err(ConnectionsServiceError::MissingCompanyName));

        let res = TestClient::post("http://example.com/pending-connections/ab12/confirm")
            .json(&json!({ "tax_id": "3-101-000001" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_confirm_duplicate_tax_id_returns_409() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .connections
            .expect_confirm_pending()
            .once()
            .return_once(|_, _| {
                Err(ConnectionsServiceError::Company(
                    CompaniesServiceError::AlreadyExists,
                ))
            });

        let res = TestClient::post("http://example.com/pending-connections/ab12/confirm")
            .json(&json!({ "name": "Twin", "tax_id": "3-101-000001" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
