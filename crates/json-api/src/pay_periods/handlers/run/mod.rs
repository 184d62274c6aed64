//! Pay Run Handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use planilla_app::domain::pay_periods::records::PayRunItemRecord;

pub(crate) mod create;
pub(crate) mod get;

/// One employee's totals in céntimos
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PayRunItemResponse {
    pub uuid: Uuid,
    pub employee_uuid: Uuid,
    pub earnings: i64,
    pub extras: i64,

    /// Zero or negative
    pub deductions: i64,

    pub employer_contributions: i64,
    pub net_pay: i64,
}

impl From<PayRunItemRecord> for PayRunItemResponse {
    fn from(record: PayRunItemRecord) -> Self {
        Self {
            uuid: record.uuid.into(),
            employee_uuid: record.employee_uuid.into(),
            earnings: record.earnings,
            extras: record.extras,
            deductions: record.deductions,
            employer_contributions: record.employer_contributions,
            net_pay: record.net_pay,
        }
    }
}

/// Pay Run Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PayRunResponse {
    pub pay_period_uuid: Uuid,
    pub items: Vec<PayRunItemResponse>,

    /// Sum of every employee's net pay
    pub net_pay_total: i64,
}

impl PayRunResponse {
    pub(crate) fn new(pay_period_uuid: Uuid, items: Vec<PayRunItemRecord>) -> Self {
        let items: Vec<PayRunItemResponse> = items.into_iter().map(Into::into).collect();
        let net_pay_total = items
            .iter()
            .map(|item| item.net_pay)
            .fold(0_i64, i64::saturating_add);

        Self {
            pay_period_uuid,
            items,
            net_pay_total,
        }
    }
}
