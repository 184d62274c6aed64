//! Pay Event Handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use planilla_app::domain::pay_periods::records::PayEventRecord;

use crate::pay_items::PayItemKindBody;

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod index;

/// Pay Event Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PayEventResponse {
    pub uuid: Uuid,
    pub pay_period_uuid: Uuid,
    pub employee_uuid: Uuid,
    pub pay_item_uuid: Uuid,

    /// Kind of the pay item when the event was recorded
    pub kind: PayItemKindBody,

    /// Signed céntimos; deductions are negative
    pub amount: i64,

    pub description: Option<String>,
    pub created_at: String,
}

impl From<PayEventRecord> for PayEventResponse {
    fn from(record: PayEventRecord) -> Self {
        Self {
            uuid: record.uuid.into(),
            pay_period_uuid: record.pay_period_uuid.into(),
            employee_uuid: record.employee_uuid.into(),
            pay_item_uuid: record.pay_item_uuid.into(),
            kind: record.kind.into(),
            amount: record.amount,
            description: record.description,
            created_at: record.created_at.to_string(),
        }
    }
}
