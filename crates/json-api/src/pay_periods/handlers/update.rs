//! Update Pay Period Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    extensions::*,
    pay_periods::{
        errors::into_status_error,
        handlers::{PayPeriodDates, PayPeriodResponse},
    },
    state::State,
};

/// Update Pay Period Handler
///
/// Only open periods can be changed.
#[endpoint(
    tags("pay-periods"),
    summary = "Update Pay Period",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Pay period updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Pay period not found"),
        (status_code = StatusCode::CONFLICT, description = "Pay period is closed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    company: PathParam<Uuid>,
    period: PathParam<Uuid>,
    json: JsonBody<PayPeriodDates>,
    depot: &mut Depot,
) -> Result<Json<PayPeriodResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let update = json.into_inner().into_update()?;

    let period = state
        .app
        .pay_periods
        .update_pay_period(
            company.into_inner().into(),
            period.into_inner().into(),
            update,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(period.into()))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use planilla_app::domain::pay_periods::{PayPeriodsServiceError, records::PayPeriodUuid};

    use crate::test_helpers::{Mocks, TEST_COMPANY_UUID, make_pay_period};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.serve(Router::with_path("companies/{company}/pay-periods/{period}").put(handler))
    }

    fn url(period: PayPeriodUuid) -> String {
        format!("http://example.com/companies/{TEST_COMPANY_UUID}/pay-periods/{period}")
    }

    fn body() -> serde_json::Value {
        json!({
            "starts_on": "2026-09-01",
            "ends_on": "2026-09-30",
            "pay_date": "2026-10-01",
        })
    }

    #[tokio::test]
    async fn test_update_pay_period_moves_pay_date() -> TestResult {
        let uuid = PayPeriodUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .pay_periods
            .expect_update_pay_period()
            .once()
            .withf(move |c, p, update| {
                *c == TEST_COMPANY_UUID && *p == uuid && update.pay_date == date(2026, 10, 1)
            })
            .return_once(move |_, _, update| {
                let mut record = make_pay_period(uuid);
                record.pay_date = update.pay_date;

                Ok(record)
            });

        let response: PayPeriodResponse = TestClient::put(url(uuid))
            .json(&body())
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert_eq!(response.pay_date, "2026-10-01");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_closed_pay_period_returns_409() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .pay_periods
            .expect_update_pay_period()
            .once()
            .return_once(|_, _, _| Err(PayPeriodsServiceError::PeriodClosed));

        let res = TestClient::put(url(PayPeriodUuid::new()))
            .json(&body())
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
