//! Company Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{companies::get::CompanyResponse, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CompaniesResponse {
    /// Live companies ordered by name
    pub companies: Vec<CompanyResponse>,
}

/// Company Index Handler
///
/// Returns every live company.
#[endpoint(
    tags("companies"),
    summary = "List Companies",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CompaniesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let companies = state
        .app
        .companies
        .list_companies()
        .await
        .or_500("failed to fetch companies")?;

    Ok(Json(CompaniesResponse {
        companies: companies.into_iter().map(Into::into).collect(),
    }))
}
