//! Pay Period Data

use jiff::civil::Date;

use crate::domain::{
    employees::records::EmployeeUuid,
    pay_items::records::PayItemUuid,
    pay_periods::records::{PayEventUuid, PayPeriodUuid},
};

/// New Pay Period Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewPayPeriod {
    pub uuid: PayPeriodUuid,
    pub starts_on: Date,
    pub ends_on: Date,
    pub pay_date: Date,
}

/// Pay Period Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct PayPeriodUpdate {
    pub starts_on: Date,
    pub ends_on: Date,
    pub pay_date: Date,
}

/// New Pay Event Data
///
/// The sign of `amount` is ignored; the pay item's kind decides it.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPayEvent {
    pub uuid: PayEventUuid,
    pub employee_uuid: EmployeeUuid,
    pub pay_item_uuid: PayItemUuid,
    pub amount: i64,
    pub description: Option<String>,
}
