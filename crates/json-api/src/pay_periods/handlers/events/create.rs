//! Create Pay Event Handler

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

use planilla_app::domain::pay_periods::{data::NewPayEvent, records::PayEventUuid};

use crate::{
    extensions::*,
    pay_periods::{errors::into_status_error, handlers::events::PayEventResponse},
    state::State,
};

/// Create Pay Event Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreatePayEventRequest {
    /// Client-chosen identifier; generated when omitted
    #[serde(default)]
    pub uuid: Option<Uuid>,

    pub employee_uuid: Uuid,
    pub pay_item_uuid: Uuid,

    /// Céntimos. The sign is ignored; the pay item's kind decides it.
    pub amount: i64,

    #[serde(default)]
    pub description: Option<String>,
}

impl From<CreatePayEventRequest> for NewPayEvent {
    fn from(request: CreatePayEventRequest) -> Self {
        NewPayEvent {
            uuid: request.uuid.map_or_else(PayEventUuid::new, Into::into),
            employee_uuid: request.employee_uuid.into(),
            pay_item_uuid: request.pay_item_uuid.into(),
            amount: request.amount,
            description: request.description,
        }
    }
}

/// Create Pay Event Handler
#[endpoint(
    tags("pay-periods"),
    summary = "Record Pay Event",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Pay event recorded"),
        (status_code = StatusCode::NOT_FOUND, description = "Pay period not found"),
        (status_code = StatusCode::CONFLICT, description = "Pay period is closed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown employee or pay item"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    company: PathParam<Uuid>,
    period: PathParam<Uuid>,
    json: JsonBody<CreatePayEventRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PayEventResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let company = company.into_inner();
    let period = period.into_inner();

    let event = state
        .app
        .pay_periods
        .create_pay_event(company.into(), period.into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(
        LOCATION,
        format!(
            "/companies/{company}/pay-periods/{period}/events/{}",
            event.uuid
        ),
        true,
    )
    .or_500("failed to set location header")?
    .status_code(StatusCode::CREATED);

    Ok(Json(event.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use planilla_app::domain::{
        employees::records::EmployeeUuid,
        pay_items::records::{PayItemKind, PayItemUuid},
        pay_periods::{PayPeriodsServiceError, records::PayPeriodUuid},
    };

    use crate::{
        pay_periods::handlers::events::fixtures::make_pay_event,
        test_helpers::{Mocks, TEST_COMPANY_UUID},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.serve(
            Router::with_path("companies/{company}/pay-periods/{period}/events").post(handler),
        )
    }

    fn url(period: PayPeriodUuid) -> String {
        format!("http://example.com/companies/{TEST_COMPANY_UUID}/pay-periods/{period}/events")
    }

    fn body() -> serde_json::Value {
        json!({
            "employee_uuid": EmployeeUuid::new().into_uuid(),
            "pay_item_uuid": PayItemUuid::new().into_uuid(),
            "amount": 4_340_000,
            "description": "CCSS",
        })
    }

    #[tokio::test]
    async fn test_create_deduction_event_is_negative() -> TestResult {
        let period = PayPeriodUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .pay_periods
            .expect_create_pay_event()
            .once()
            .withf(move |c, p, new| {
                *c == TEST_COMPANY_UUID && *p == period && new.amount == 4_340_000
            })
            .return_once(|_, p, new| {
                Ok(make_pay_event(new.uuid, p, PayItemKind::Deduction, new.amount))
            });

        let mut res = TestClient::post(url(period))
            .json(&body())
            .send(&make_service(mocks))
            .await;

        let event: PayEventResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(event.amount, -4_340_000);
        assert_eq!(
            location,
            Some(
                format!(
                    "/companies/{TEST_COMPANY_UUID}/pay-periods/{period}/events/{}",
                    event.uuid
                )
                .as_str()
            )
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_create_event_in_closed_period_returns_409() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .pay_periods
            .expect_create_pay_event()
            .once()
            .return_once(|_, _, _| Err(PayPeriodsServiceError::PeriodClosed));

        let res = TestClient::post(url(PayPeriodUuid::new()))
            .json(&body())
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_event_for_unknown_employee_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .pay_periods
            .expect_create_pay_event()
            .once()
            .return_once(|_, _, _| Err(PayPeriodsServiceError::InvalidReference));

        let res = TestClient::post(url(PayPeriodUuid::new()))
            .json(&body())
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
