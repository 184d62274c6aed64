//! Sales Summary Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{PathParam, QueryParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use planilla_app::{domain::catalog::records::SalesReport, tariffs::Tariff};

use crate::{catalog::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TariffTotal {
    /// IVA tariff label
    pub tariff: String,

    /// Taxable base in céntimos
    pub amount: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SalesSummaryResponse {
    pub from: String,
    pub to: String,

    /// Number of invoices read
    pub invoices: usize,

    /// One entry per tariff, zero when nothing was sold under it
    pub totals: Vec<TariffTotal>,
}

impl From<SalesReport> for SalesSummaryResponse {
    fn from(report: SalesReport) -> Self {
        Self {
            from: report.from.to_string(),
            to: report.to.to_string(),
            invoices: report.summary.invoices,
            totals: Tariff::ALL
                .into_iter()
                .map(|tariff| TariffTotal {
                    tariff: tariff.label().to_owned(),
                    amount: report.summary.total_for(tariff),
                })
                .collect(),
        }
    }
}

/// Sales Summary Handler
///
/// Adds up invoice sales lines dated `from..=to` per IVA tariff.
#[endpoint(
    tags("catalog"),
    summary = "Sales per IVA Tariff",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Sales summary"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid date range"),
        (status_code = StatusCode::NOT_FOUND, description = "Company is not connected"),
        (status_code = StatusCode::BAD_GATEWAY, description = "QuickBooks request failed"),
    ),
)]
pub(crate) async fn handler(
    company: PathParam<Uuid>,
    from: QueryParam<String, true>,
    to: QueryParam<String, true>,
    depot: &mut Depot,
) -> Result<Json<SalesSummaryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let from = from.into_date("from")?;
    let to = to.into_date("to")?;

    let report = state
        .app
        .catalog
        .sales_summary(company.into_inner().into(), from, to)
        .await
        .map_err(into_status_error)?;

    Ok(Json(report.into()))
}
