//! Delete Pay Event Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, pay_periods::errors::into_status_error, state::State};

/// Delete Pay Event Handler
#[endpoint(
    tags("pay-periods"),
    summary = "Delete Pay Event",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Pay event deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Pay event not found"),
        (status_code = StatusCode::CONFLICT, description = "Pay period is closed"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    company: PathParam<Uuid>,
    period: PathParam<Uuid>,
    event: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .pay_periods
        .delete_pay_event(
            company.into_inner().into(),
            period.into_inner().into(),
            event.into_inner().into(),
        )
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use planilla_app::domain::pay_periods::{
        PayPeriodsServiceError,
        records::{PayEventUuid, PayPeriodUuid},
    };

    use crate::test_helpers::{Mocks, TEST_COMPANY_UUID};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.serve(
            Router::with_path("companies/{company}/pay-periods/{period}/events/{event}")
                .delete(handler),
        )
    }

    fn url(period: PayPeriodUuid, event: PayEventUuid) -> String {
        format!(
            "http://example.com/companies/{TEST_COMPANY_UUID}/pay-periods/{period}/events/{event}"
        )
    }

    #[tokio::test]
    async fn test_delete_pay_event_success() -> TestResult {
        let period = PayPeriodUuid::new();
        let event = PayEventUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .pay_periods
            .expect_delete_pay_event()
            .once()
            .withf(move |c, p, e| *c == TEST_COMPANY_UUID && *p == period && *e == event)
            .return_once(|_, _, _| Ok(()));

        let res = TestClient::delete(url(period, event))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_event_from_closed_period_returns_409() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .pay_periods
            .expect_delete_pay_event()
            .once()
            .return_once(|_, _, _| Err(PayPeriodsServiceError::PeriodClosed));

        let res = TestClient::delete(url(PayPeriodUuid::new(), PayEventUuid::new()))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
