//! Employee Handlers

use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use planilla_app::domain::employees::{data::EmployeeUpdate, records::EmployeeRecord};

use crate::extensions::*;

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;

/// Employee Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct EmployeeResponse {
    pub uuid: Uuid,
    pub company_uuid: Uuid,
    pub full_name: String,

    /// Cédula
    pub national_id: String,

    pub email: Option<String>,
    pub job_title: Option<String>,

    /// Monthly base salary in céntimos
    pub base_salary: u64,

    pub hired_on: String,
    pub terminated_on: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<EmployeeRecord> for EmployeeResponse {
    fn from(record: EmployeeRecord) -> Self {
        Self {
            uuid: record.uuid.into(),
            company_uuid: record.company_uuid.into(),
            full_name: record.full_name,
            national_id: record.national_id,
            email: record.email,
            job_title: record.job_title,
            base_salary: record.base_salary,
            hired_on: record.hired_on.to_string(),
            terminated_on: record.terminated_on.map(|d| d.to_string()),
            created_at: record.created_at.to_string(),
            updated_at: record.updated_at.to_string(),
        }
    }
}

/// Editable employee fields, shared by create and update
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct EmployeeFields {
    pub full_name: String,
    pub national_id: String,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub job_title: Option<String>,

    /// Monthly base salary in céntimos
    pub base_salary: u64,

    /// `YYYY-MM-DD`
    pub hired_on: String,

    /// `YYYY-MM-DD`
    #[serde(default)]
    pub terminated_on: Option<String>,
}

impl EmployeeFields {
    pub(crate) fn into_update(self) -> Result<EmployeeUpdate, StatusError> {
        let hired_on = self.hired_on.parse_date("hired_on")?;
        let terminated_on = self
            .terminated_on
            .as_deref()
            .map(|value| value.parse_date("terminated_on"))
            .transpose()?;

        Ok(EmployeeUpdate {
            full_name: self.full_name,
            national_id: self.national_id,
            email: self.email,
            job_title: self.job_title,
            base_salary: self.base_salary,
            hired_on,
            terminated_on,
        })
    }
}
