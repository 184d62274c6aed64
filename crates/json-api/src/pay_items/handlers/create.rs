//! Create Pay Item Handler

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
use uuid::Uuid;

use planilla_app::domain::pay_items::{data::NewPayItem, records::PayItemUuid};

use crate::{
    extensions::*,
    pay_items::{errors::into_status_error, handlers::PayItemKindBody},
    state::State,
};

/// Create Pay Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreatePayItemRequest {
    /// Client-chosen identifier; generated when omitted
    #[serde(default)]
    pub uuid: Option<Uuid>,

    /// Short code, unique per company
    pub code: String,

    pub name: String,
    pub kind: PayItemKindBody,
}

impl From<CreatePayItemRequest> for NewPayItem {
    fn from(request: CreatePayItemRequest) -> Self {
        NewPayItem {
            uuid: request.uuid.map_or_else(PayItemUuid::new, Into::into),
            code: request.code,
            name: request.name,
            kind: request.kind.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PayItemCreatedResponse {
    pub uuid: Uuid,
}

/// Create Pay Item Handler
#[endpoint(
    tags("pay-items"),
    summary = "Create Pay Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Pay item created"),
        (status_code = StatusCode::CONFLICT, description = "Code already used in this company"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    company: PathParam<Uuid>,
    json: JsonBody<CreatePayItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PayItemCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let company = company.into_inner();

    let uuid = state
        .app
        .pay_items
        .create_pay_item(company.into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?
        .uuid;

    res.add_header(
        LOCATION,
        format!("/companies/{company}/pay-items/{uuid}"),
        true,
    )
    .or_500("failed to set location header")?
    .status_code(StatusCode::CREATED);

    Ok(Json(PayItemCreatedResponse { uuid: uuid.into() }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use planilla_app::domain::pay_items::{PayItemsServiceError, records::PayItemKind};

    use crate::test_helpers::{Mocks, TEST_COMPANY_UUID, make_pay_item};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.serve(Router::with_path("companies/{company}/pay-items").post(handler))
    }

    fn url() -> String {
        format!("http://example.com/companies/{TEST_COMPANY_UUID}/pay-items")
    }

    #[tokio::test]
    async fn test_create_pay_item_success() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .pay_items
            .expect_create_pay_item()
            .once()
            .withf(|c, new| {
                *c == TEST_COMPANY_UUID
                    && new.code == "CCSS"
                    && new.kind == PayItemKind::Deduction
            })
            .return_once(|_, new| Ok(make_pay_item(new.uuid, new.kind)));

        let mut res = TestClient::post(url())
            .json(&json!({ "code": "CCSS", "name": "CCSS obrero", "kind": "deduction" }))
            .send(&make_service(mocks))
            .await;

        let body: PayItemCreatedResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(
            location,
            Some(format!("/companies/{TEST_COMPANY_UUID}/pay-items/{}", body.uuid).as_str())
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_create_pay_item_unknown_kind_returns_400() -> TestResult {
        let res = TestClient::post(url())
            .json(&json!({ "code": "BONO", "name": "Bono", "kind": "bonus" }))
            .send(&make_service(Mocks::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_pay_item_duplicate_code_returns_409() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .pay_items
            .expect_create_pay_item()
            .once()
            .return_once(|_, _| Err(PayItemsServiceError::AlreadyExists));

        let res = TestClient::post(url())
            .json(&json!({ "code": "SAL", "name": "Salario", "kind": "earning" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
