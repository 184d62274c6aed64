//! Create Employee Handler

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

use planilla_app::domain::employees::{data::NewEmployee, records::EmployeeUuid};

use crate::{
    employees::{errors::into_status_error, handlers::EmployeeFields},
    extensions::*,
    state::State,
};

/// Create Employee Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateEmployeeRequest {
    /// Client-chosen identifier; generated when omitted
    #[serde(default)]
    pub uuid: Option<Uuid>,

    #[serde(flatten)]
    pub fields: EmployeeFields,
}

impl CreateEmployeeRequest {
    fn into_new_employee(self) -> Result<NewEmployee, StatusError> {
        let uuid = self.uuid.map_or_else(EmployeeUuid::new, Into::into);
        let fields = self.fields.into_update()?;

        Ok(NewEmployee {
            uuid,
            full_name: fields.full_name,
            national_id: fields.national_id,
            email: fields.email,
            job_title: fields.job_title,
            base_salary: fields.base_salary,
            hired_on: fields.hired_on,
            terminated_on: fields.terminated_on,
        })
    }
}

/// Employee Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct EmployeeCreatedResponse {
    pub uuid: Uuid,
}

/// Create Employee Handler
#[endpoint(
    tags("employees"),
    summary = "Create Employee",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Employee created"),
        (status_code = StatusCode::CONFLICT, description = "National id already used in this company"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    company: PathParam<Uuid>,
    json: JsonBody<CreateEmployeeRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<EmployeeCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let company = company.into_inner();
    let employee = json.into_inner().into_new_employee()?;

    let uuid = state
        .app
        .employees
        .create_employee(company.into(), employee)
        .await
        .map_err(into_status_error)?
        .uuid;

    res.add_header(
        LOCATION,
        format!("/companies/{company}/employees/{uuid}"),
        true,
    )
    .or_500("failed to set location header")?
    .status_code(StatusCode::CREATED);

    Ok(Json(EmployeeCreatedResponse { uuid: uuid.into() }))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use planilla_app::domain::employees::EmployeesServiceError;

    use crate::test_helpers::{Mocks, TEST_COMPANY_UUID, make_employee};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.serve(Router::with_path("companies/{company}/employees").post(handler))
    }

    fn url() -> String {
        format!("http://example.com/companies/{TEST_COMPANY_UUID}/employees")
    }

    #[tokio::test]
    async fn test_create_employee_success() -> TestResult {
        let uuid = EmployeeUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .employees
            .expect_create_employee()
            .once()
            .withf(move |c, new| {
                *c == TEST_COMPANY_UUID
                    && new.uuid == uuid
                    && new.full_name == "María Rodríguez"
                    && new.hired_on == date(2025, 1, 6)
                    && new.terminated_on.is_none()
            })
            .return_once(move |_, _| Ok(make_employee(uuid)));

        let mut res = TestClient::post(url())
            .json(&json!({
                "uuid": uuid.into_uuid(),
                "full_name": "María Rodríguez",
                "national_id": "1-1234-0567",
                "base_salary": 45_000_000,
                "hired_on": "2025-01-06",
            }))
            .send(&make_service(mocks))
            .await;

        let body: EmployeeCreatedResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(
            location,
            Some(format!("/companies/{TEST_COMPANY_UUID}/employees/{uuid}").as_str())
        );
        assert_eq!(body.uuid, uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_create_employee_bad_hire_date_returns_400() -> TestResult {
        let res = TestClient::post(url())
            .json(&json!({
                "full_name": "Ana Mora",
                "national_id": "2-0456-0789",
                "base_salary": 40_000_000,
                "hired_on": "06/01/2025",
            }))
            .send(&make_service(Mocks::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_employee_negative_salary_returns_400() -> TestResult {
        let res = TestClient::post(url())
            .json(&json!({
                "full_name": "Ana Mora",
                "national_id": "2-0456-0789",
                "base_salary": -1,
                "hired_on": "2025-01-06",
            }))
            .send(&make_service(Mocks::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_employee_duplicate_national_id_returns_409() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .employees
            .expect_create_employee()
            .once()
            .return_once(|_, _| Err(EmployeesServiceError::AlreadyExists));

        let res = TestClient::post(url())
            .json(&json!({
                "full_name": "Twin",
                "national_id": "1-1234-0567",
                "base_salary": 1,
                "hired_on": "2025-01-06",
            }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_employee_unknown_company_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .employees
            .expect_create_employee()
            .once()
            .return_once(|_, _| Err(EmployeesServiceError::InvalidReference));

        let res = TestClient::post(url())
            .json(&json!({
                "full_name": "Orphan",
                "national_id": "3-0001-0001",
                "base_salary": 1,
                "hired_on": "2025-01-06",
            }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
