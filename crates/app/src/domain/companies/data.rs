//! Company Data

use crate::domain::companies::records::{CompanyUuid, PaySplit};

/// New Company Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCompany {
    /// UUID to assign to the company row.
    pub uuid: CompanyUuid,

    /// Company name to persist.
    pub name: String,

    /// Legal tax identifier.
    pub tax_id: String,

    /// QuickBooks realm id when the company is created from a connection.
    pub realm_id: Option<String>,

    pub payroll_policy: Option<String>,

    pub vacation_policy: Option<String>,

    pub pay_split: PaySplit,
}

/// Company Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyUpdate {
    pub name: String,
    pub tax_id: String,
    pub payroll_policy: Option<String>,
    pub vacation_policy: Option<String>,
    pub pay_split: PaySplit,
}
