//! Classified Tax Rates Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use planilla_app::domain::catalog::records::ClassifiedTaxRate;

use crate::{catalog::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TaxRateResponse {
    /// QuickBooks tax rate id
    pub id: String,

    pub name: String,
    pub description: Option<String>,

    /// Percentage reported by QuickBooks
    pub rate_value: Option<f64>,

    pub active: bool,

    /// IVA tariff: general-13, reduced-4, reduced-2, reduced-1 or exempt
    pub tariff: String,
}

impl From<ClassifiedTaxRate> for TaxRateResponse {
    fn from(classified: ClassifiedTaxRate) -> Self {
        Self {
            id: classified.rate.id,
            name: classified.rate.name,
            description: classified.rate.description,
            rate_value: classified.rate.rate_value,
            active: classified.rate.active,
            tariff: classified.tariff.label().to_owned(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TaxRatesResponse {
    pub tax_rates: Vec<TaxRateResponse>,
}

/// Classified Tax Rates Handler
///
/// Lists the company's QuickBooks tax rates with the IVA tariff each one
/// reports under.
#[endpoint(
    tags("catalog"),
    summary = "List Classified Tax Rates",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Tax rates"),
        (status_code = StatusCode::NOT_FOUND, description = "Company is not connected"),
        (status_code = StatusCode::BAD_GATEWAY, description = "QuickBooks request failed"),
    ),
)]
pub(crate) async fn handler(
    company: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<TaxRatesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let tax_rates = state
        .app
        .catalog
        .tax_rates(company.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(TaxRatesResponse {
        tax_rates: tax_rates.into_iter().map(Into::into).collect(),
    }))
}
