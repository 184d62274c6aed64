//! Update Company Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use planilla_app::domain::companies::data::CompanyUpdate;

use crate::{
    companies::{errors::into_status_error, get::CompanyResponse, handlers::PaySplitBody},
    extensions::*,
    state::State,
};

/// Update Company Request
///
/// Replaces every editable field; the realm link is managed by the
/// connection flow.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCompanyRequest {
    pub name: String,
    pub tax_id: String,

    #[serde(default)]
    pub payroll_policy: Option<String>,

    #[serde(default)]
    pub vacation_policy: Option<String>,

    pub pay_split: PaySplitBody,
}

impl From<UpdateCompanyRequest> for CompanyUpdate {
    fn from(request: UpdateCompanyRequest) -> Self {
        CompanyUpdate {
            name: request.name,
            tax_id: request.tax_id,
            payroll_policy: request.payroll_policy,
            vacation_policy: request.vacation_policy,
            pay_split: request.pay_split.into(),
        }
    }
}

/// Update Company Handler
#[endpoint(
    tags("companies"),
    summary = "Update Company",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Company updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Company not found"),
        (status_code = StatusCode::CONFLICT, description = "Tax id already in use"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    company: PathParam<Uuid>,
    json: JsonBody<UpdateCompanyRequest>,
    depot: &mut Depot,
) -> Result<Json<CompanyResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let company = state
        .app
        .companies
        .update_company(company.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(company.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use planilla_app::domain::companies::{
        CompaniesServiceError,
        records::{CompanyRecord, CompanyUuid},
    };

    use crate::test_helpers::{Mocks, make_company};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.serve(Router::with_path("companies/{company}").put(handler))
    }

    fn biweekly() -> serde_json::Value {
        json!({
            "name": "Soda La Esquina S.A.",
            "tax_id": "3-101-000001",
            "payroll_policy": "Quincenal",
            "pay_split": { "first": 50, "second": 50, "third": 0, "fourth": 0 },
        })
    }

    #[tokio::test]
    async fn test_update_company_success() -> TestResult {
        let uuid = CompanyUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .companies
            .expect_update_company()
            .once()
            .withf(move |c, update| {
                *c == uuid
                    && update.name == "Soda La Esquina S.A."
                    && update.payroll_policy.as_deref() == Some("Quincenal")
                    && update.pay_split.first == 50
                    && update.pay_split.second == 50
            })
            .return_once(move |_, update| {
                Ok(CompanyRecord {
                    name: update.name,
                    payroll_policy: update.payroll_policy,
                    pay_split: update.pay_split,
                    ..make_company(uuid)
                })
            });

        let mut res = TestClient::put(format!("http://example.com/companies/{uuid}"))
            .json(&biweekly())
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CompanyResponse = res.take_json().await?;

        assert_eq!(body.name, "Soda La Esquina S.A.");
        assert_eq!(body.pay_split.second, 50);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_company_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .companies
            .expect_update_company()
            .once()
            .return_once(|_, _| Err(CompaniesServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/companies/{}", Uuid::now_v7()))
            .json(&biweekly())
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
