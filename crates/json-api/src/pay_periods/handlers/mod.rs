//! Pay Period Handlers

use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use planilla_app::domain::pay_periods::{data::PayPeriodUpdate, records::PayPeriodRecord};

use crate::extensions::*;

pub(crate) mod close;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod events;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod run;
pub(crate) mod update;

/// Pay Period Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PayPeriodResponse {
    pub uuid: Uuid,
    pub company_uuid: Uuid,
    pub starts_on: String,
    pub ends_on: String,
    pub pay_date: String,

    /// Set once closed; closed periods are read-only
    pub closed_at: Option<String>,

    pub created_at: String,
    pub updated_at: String,
}

impl From<PayPeriodRecord> for PayPeriodResponse {
    fn from(record: PayPeriodRecord) -> Self {
        Self {
            uuid: record.uuid.into(),
            company_uuid: record.company_uuid.into(),
            starts_on: record.starts_on.to_string(),
            ends_on: record.ends_on.to_string(),
            pay_date: record.pay_date.to_string(),
            closed_at: record.closed_at.map(|t| t.to_string()),
            created_at: record.created_at.to_string(),
            updated_at: record.updated_at.to_string(),
        }
    }
}

/// Pay period dates, all `YYYY-MM-DD`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PayPeriodDates {
    pub starts_on: String,
    pub ends_on: String,
    pub pay_date: String,
}

impl PayPeriodDates {
    pub(crate) fn into_update(self) -> Result<PayPeriodUpdate, StatusError> {
        Ok(PayPeriodUpdate {
            starts_on: self.starts_on.parse_date("starts_on")?,
            ends_on: self.ends_on.parse_date("ends_on")?,
            pay_date: self.pay_date.parse_date("pay_date")?,
        })
    }
}
