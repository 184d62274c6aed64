//! Create Company Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use planilla_app::domain::companies::{data::NewCompany, records::CompanyUuid};

use crate::{
    companies::{errors::into_status_error, handlers::PaySplitBody},
    extensions::*,
    state::State,
};

/// Create Company Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCompanyRequest {
    /// Client-chosen identifier; generated when omitted
    #[serde(default)]
    pub uuid: Option<Uuid>,

    pub name: String,
    pub tax_id: String,

    #[serde(default)]
    pub payroll_policy: Option<String>,

    #[serde(default)]
    pub vacation_policy: Option<String>,

    /// Defaults to paying everything on the first pay date
    #[serde(default)]
    pub pay_split: PaySplitBody,
}

impl From<CreateCompanyRequest> for NewCompany {
    fn from(request: CreateCompanyRequest) -> Self {
        NewCompany {
            uuid: request.uuid.map_or_else(CompanyUuid::new, Into::into),
            name: request.name,
            tax_id: request.tax_id,
            realm_id: None,
            payroll_policy: request.payroll_policy,
            vacation_policy: request.vacation_policy,
            pay_split: request.pay_split.into(),
        }
    }
}

/// Company Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CompanyCreatedResponse {
    /// Created company UUID
    pub uuid: Uuid,
}

/// Create Company Handler
#[endpoint(
    tags("companies"),
    summary = "Create Company",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Company created"),
        (status_code = StatusCode::CONFLICT, description = "Company already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCompanyRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CompanyCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let uuid = state
        .app
        .companies
        .create_company(json.into_inner().into())
        .await
        .map_err(into_status_error)?
        .uuid;

    res.add_header(LOCATION, format!("/companies/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(CompanyCreatedResponse { uuid: uuid.into() }))
}
