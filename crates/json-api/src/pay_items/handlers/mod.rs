//! Pay Item Handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use planilla_app::domain::pay_items::records::{PayItemKind, PayItemRecord};

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;

/// What the item does to an employee's pay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum PayItemKindBody {
    Earning,
    Extra,
    Deduction,
    EmployerContribution,
}

impl From<PayItemKind> for PayItemKindBody {
    fn from(kind: PayItemKind) -> Self {
        match kind {
            PayItemKind::Earning => Self::Earning,
            PayItemKind::Extra => Self::Extra,
            PayItemKind::Deduction => Self::Deduction,
            PayItemKind::EmployerContribution => Self::EmployerContribution,
        }
    }
}

impl From<PayItemKindBody> for PayItemKind {
    fn from(kind: PayItemKindBody) -> Self {
        match kind {
            PayItemKindBody::Earning => Self::Earning,
            PayItemKindBody::Extra => Self::Extra,
            PayItemKindBody::Deduction => Self::Deduction,
            PayItemKindBody::EmployerContribution => Self::EmployerContribution,
        }
    }
}

/// Pay Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PayItemResponse {
    pub uuid: Uuid,
    pub company_uuid: Uuid,
    pub code: String,
    pub name: String,
    pub kind: PayItemKindBody,
    pub created_at: String,
    pub updated_at: String,
}

impl From<PayItemRecord> for PayItemResponse {
    fn from(record: PayItemRecord) -> Self {
        Self {
            uuid: record.uuid.into(),
            company_uuid: record.company_uuid.into(),
            code: record.code,
            name: record.name,
            kind: record.kind.into(),
            created_at: record.created_at.to_string(),
            updated_at: record.updated_at.to_string(),
        }
    }
}
