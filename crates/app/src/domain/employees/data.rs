//! Employee Data

use jiff::civil::Date;

use crate::domain::employees::records::EmployeeUuid;

/// New Employee Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub uuid: EmployeeUuid,
    pub full_name: String,
    pub national_id: String,
    pub email: Option<String>,
    pub job_title: Option<String>,
    pub base_salary: u64,
    pub hired_on: Date,
    pub terminated_on: Option<Date>,
}

/// Employee Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeUpdate {
    pub full_name: String,
    pub national_id: String,
    pub email: Option<String>,
    pub job_title: Option<String>,
    pub base_salary: u64,
    pub hired_on: Date,
    pub terminated_on: Option<Date>,
}
