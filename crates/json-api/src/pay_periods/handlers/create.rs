//! Create Pay Period Handler

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

use planilla_app::domain::pay_periods::{data::NewPayPeriod, records::PayPeriodUuid};

use crate::{
    extensions::*,
    pay_periods::{errors::into_status_error, handlers::PayPeriodDates},
    state::State,
};

/// Create Pay Period Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreatePayPeriodRequest {
    /// Client-chosen identifier; generated when omitted
    #[serde(default)]
    pub uuid: Option<Uuid>,

    #[serde(flatten)]
    pub dates: PayPeriodDates,
}

impl CreatePayPeriodRequest {
    fn into_new_period(self) -> Result<NewPayPeriod, StatusError> {
        let uuid = self.uuid.map_or_else(PayPeriodUuid::new, Into::into);
        let dates = self.dates.into_update()?;

        Ok(NewPayPeriod {
            uuid,
            starts_on: dates.starts_on,
            ends_on: dates.ends_on,
            pay_date: dates.pay_date,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PayPeriodCreatedResponse {
    pub uuid: Uuid,
}

/// Create Pay Period Handler
#[endpoint(
    tags("pay-periods"),
    summary = "Create Pay Period",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Pay period created"),
        (status_code = StatusCode::CONFLICT, description = "A period with these dates exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    company: PathParam<Uuid>,
    json: JsonBody<CreatePayPeriodRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PayPeriodCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let company = company.into_inner();
    let period = json.into_inner().into_new_period()?;

    let uuid = state
        .app
        .pay_periods
        .create_pay_period(company.into(), period)
        .await
        .map_err(into_status_error)?
        .uuid;

    res.add_header(
        LOCATION,
        format!("/companies/{company}/pay-periods/{uuid}"),
        true,
    )
    .or_500("failed to set location header")?
    .status_code(StatusCode::CREATED);

    Ok(Json(PayPeriodCreatedResponse { uuid: uuid.into() }))
}
