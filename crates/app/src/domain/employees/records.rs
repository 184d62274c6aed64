//! Employee Records

use jiff::{Timestamp, civil::Date};

use crate::{domain::companies::records::CompanyUuid, uuids::TypedUuid};

/// Employee UUID
pub type EmployeeUuid = TypedUuid<EmployeeRecord>;

/// Employee Record
#[derive(Debug, Clone)]
pub struct EmployeeRecord {
    pub uuid: EmployeeUuid,
    pub company_uuid: CompanyUuid,
    pub full_name: String,

    /// National id (cédula), unique per company.
    pub national_id: String,

    pub email: Option<String>,
    pub job_title: Option<String>,

    /// Monthly base salary in minor units (céntimos).
    pub base_salary: u64,

    pub hired_on: Date,
    pub terminated_on: Option<Date>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}
