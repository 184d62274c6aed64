//! Test Helpers

use jiff::civil::{Date, date};

use crate::domain::{
    companies::{
        data::NewCompany,
        records::{CompanyUuid, PaySplit},
    },
    employees::{data::NewEmployee, records::EmployeeUuid},
    pay_items::{
        data::NewPayItem,
        records::{PayItemKind, PayItemUuid},
    },
    pay_periods::{data::NewPayPeriod, records::PayPeriodUuid},
};

pub(crate) fn new_company(name: &str, tax_id: &str) -> NewCompany {
    NewCompany {
        uuid: CompanyUuid::new(),
        name: name.to_string(),
        tax_id: tax_id.to_string(),
        realm_id: None,
        payroll_policy: None,
        vacation_policy: None,
        pay_split: PaySplit::default(),
    }
}

pub(crate) fn new_employee(national_id: &str) -> NewEmployee {
    NewEmployee {
        uuid: EmployeeUuid::new(),
        full_name: format!("Employee {national_id}"),
        national_id: national_id.to_string(),
        email: None,
        job_title: Some("Cajero".to_string()),
        base_salary: 45_000_000,
        hired_on: date(2025, 1, 6),
        terminated_on: None,
    }
}

pub(crate) fn new_pay_item(code: &str, kind: PayItemKind) -> NewPayItem {
    NewPayItem {
        uuid: PayItemUuid::new(),
        code: code.to_string(),
        name: format!("Pay item {code}"),
        kind,
    }
}

/// A period covering the rest of the month `starts_on` falls in, paid on its last day.
pub(crate) fn new_pay_period(starts_on: Date) -> NewPayPeriod {
    let ends_on = starts_on.last_of_month();

    NewPayPeriod {
        uuid: PayPeriodUuid::new(),
        starts_on,
        ends_on,
        pay_date: ends_on,
    }
}
