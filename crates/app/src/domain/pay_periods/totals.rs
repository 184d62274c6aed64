//! Pay run totals.

use std::collections::BTreeMap;

use crate::domain::{
    employees::records::EmployeeUuid, pay_items::records::PayItemKind,
    pay_periods::records::PayEventRecord,
};

/// One employee's totals for a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayRunTotals {
    pub employee_uuid: EmployeeUuid,
    pub earnings: i64,
    pub extras: i64,
    pub deductions: i64,
    pub employer_contributions: i64,
    pub net_pay: i64,
}

impl PayRunTotals {
    fn new(employee_uuid: EmployeeUuid) -> Self {
        Self {
            employee_uuid,
            earnings: 0,
            extras: 0,
            deductions: 0,
            employer_contributions: 0,
            net_pay: 0,
        }
    }

    fn add(&mut self, kind: PayItemKind, amount: i64) {
        let bucket = match kind {
            PayItemKind::Earning => &mut self.earnings,
            PayItemKind::Extra => &mut self.extras,
            PayItemKind::Deduction => &mut self.deductions,
            PayItemKind::EmployerContribution => &mut self.employer_contributions,
        };

        *bucket = bucket.saturating_add(kind.normalise_amount(amount));

        self.net_pay = self
            .earnings
            .saturating_add(self.extras)
            .saturating_add(self.deductions);
    }
}

/// Totals pay events per employee, ordered by employee UUID.
///
/// Employer contributions are reported but do not change net pay.
#[must_use]
pub fn summarize_events(events: &[PayEventRecord]) -> Vec<PayRunTotals> {
    let mut totals: BTreeMap<EmployeeUuid, PayRunTotals> = BTreeMap::new();

    for event in events {
        totals
            .entry(event.employee_uuid)
            .or_insert_with(|| PayRunTotals::new(event.employee_uuid))
            .add(event.kind, event.amount);
    }

    totals.into_values().collect()
}
