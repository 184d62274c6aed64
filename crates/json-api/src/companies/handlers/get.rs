//! Get Company Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use planilla_app::domain::companies::records::CompanyRecord;

use crate::{
    companies::{errors::into_status_error, handlers::PaySplitBody},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CompanyResponse {
    /// The unique identifier of the company
    pub uuid: Uuid,

    pub name: String,

    /// Legal tax identifier
    pub tax_id: String,

    /// Linked QuickBooks realm, if connected
    pub realm_id: Option<String>,

    pub payroll_policy: Option<String>,
    pub vacation_policy: Option<String>,
    pub pay_split: PaySplitBody,

    /// The date and time the company was created
    pub created_at: String,

    /// The date and time the company was last updated
    pub updated_at: String,
}

impl From<CompanyRecord> for CompanyResponse {
    fn from(company: CompanyRecord) -> Self {
        CompanyResponse {
            uuid: company.uuid.into(),
            name: company.name,
            tax_id: company.tax_id,
            realm_id: company.realm_id,
            payroll_policy: company.payroll_policy,
            vacation_policy: company.vacation_policy,
            pay_split: company.pay_split.into(),
            created_at: company.created_at.to_string(),
            updated_at: company.updated_at.to_string(),
        }
    }
}

/// Get Company Handler
///
/// Returns a company.
#[endpoint(
    tags("companies"),
    summary = "Get Company",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Company"),
        (status_code = StatusCode::NOT_FOUND, description = "Company not found"),
    ),
)]
pub(crate) async fn handler(
    company: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CompanyResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let company = state
        .app
        .companies
        .get_company(company.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(company.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use planilla_app::domain::companies::{CompaniesServiceError, records::CompanyUuid};

    use crate::test_helpers::{Mocks, make_company};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.serve(Router::with_path("companies/{company}").get(handler))
    }

    #[tokio::test]
    async fn test_get_returns_company() -> TestResult {
        let uuid = CompanyUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .companies
            .expect_get_company()
            .once()
            .withf(move |c| *c == uuid)
            .return_once(move |_| {
                Ok(CompanyRecord {
                    realm_id: Some("9130350000000001".to_string()),
                    ..make_company(uuid)
                })
            });

        let mut res = TestClient::get(format!("http://example.com/companies/{uuid}"))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CompanyResponse = res.take_json().await?;

        assert_eq!(body.uuid, uuid.into_uuid());
        assert_eq!(body.realm_id.as_deref(), Some("9130350000000001"));
        assert_eq!(body.pay_split, PaySplitBody::default());

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_company_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .companies
            .expect_get_company()
            .once()
            .return_once(|_| Err(CompaniesServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/companies/{}", Uuid::now_v7()))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_malformed_uuid_returns_400() -> TestResult {
        let res = TestClient::get("http://example.com/companies/not-a-uuid")
            .send(&make_service(Mocks::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
