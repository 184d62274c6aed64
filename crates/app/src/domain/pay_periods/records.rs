//! Pay Period Records

use jiff::{Timestamp, civil::Date};

use crate::{
    domain::{
        companies::records::CompanyUuid,
        employees::records::EmployeeUuid,
        pay_items::records::{PayItemKind, PayItemUuid},
    },
    uuids::TypedUuid,
};

/// Pay Period UUID
pub type PayPeriodUuid = TypedUuid<PayPeriodRecord>;

/// Pay Event UUID
pub type PayEventUuid = TypedUuid<PayEventRecord>;

/// Pay Run Item UUID
pub type PayRunItemUuid = TypedUuid<PayRunItemRecord>;

/// Pay Period Record
#[derive(Debug, Clone)]
pub struct PayPeriodRecord {
    pub uuid: PayPeriodUuid,
    pub company_uuid: CompanyUuid,
    pub starts_on: Date,
    pub ends_on: Date,
    pub pay_date: Date,

    /// Set once the period is closed; closed periods are read-only.
    pub closed_at: Option<Timestamp>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl PayPeriodRecord {
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed_at.is_some()
    }
}

/// Pay Event Record
///
/// `amount` is in minor units and already carries the sign implied by `kind`.
#[derive(Debug, Clone)]
pub struct PayEventRecord {
    pub uuid: PayEventUuid,
    pub company_uuid: CompanyUuid,
    pub employee_uuid: EmployeeUuid,
    pub pay_period_uuid: PayPeriodUuid,
    pub pay_item_uuid: PayItemUuid,
    pub kind: PayItemKind,
    pub amount: i64,
    pub description: Option<String>,
    pub created_at: Timestamp,
}

/// Pay Run Item Record
#[derive(Debug, Clone)]
pub struct PayRunItemRecord {
    pub uuid: PayRunItemUuid,
    pub company_uuid: CompanyUuid,
    pub pay_period_uuid: PayPeriodUuid,
    pub employee_uuid: EmployeeUuid,
    pub earnings: i64,
    pub extras: i64,

    /// Sum of deductions; zero or negative.
    pub deductions: i64,

    pub employer_contributions: i64,

    /// `earnings + extras + deductions`.
    pub net_pay: i64,

    pub created_at: Timestamp,
}
