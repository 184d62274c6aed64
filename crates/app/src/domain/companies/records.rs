//! Company Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Company UUID
pub type CompanyUuid = TypedUuid<CompanyRecord>;

/// Company Record
///
/// A company is the tenant every other record hangs off. `realm_id` links it
/// to a QuickBooks Online company while it is connected.
#[derive(Debug, Clone)]
pub struct CompanyRecord {
    /// Unique company identifier.
    pub uuid: CompanyUuid,

    /// Human-readable company name.
    pub name: String,

    /// Legal tax identifier (cédula jurídica or física).
    pub tax_id: String,

    /// QuickBooks realm id; `None` while disconnected.
    pub realm_id: Option<String>,

    /// Free-text payroll policy notes.
    pub payroll_policy: Option<String>,

    /// Free-text vacation policy notes.
    pub vacation_policy: Option<String>,

    /// Share of the monthly payroll paid on each pay date of the month.
    pub pay_split: PaySplit,

    /// Company creation timestamp.
    pub created_at: Timestamp,

    /// Last update timestamp.
    pub updated_at: Timestamp,

    /// Soft-delete timestamp when deleted.
    pub deleted_at: Option<Timestamp>,
}

/// Percentages of the monthly payroll paid on up to four pay dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaySplit {
    pub first: u8,
    pub second: u8,
    pub third: u8,
    pub fourth: u8,
}

impl PaySplit {
    /// Total of the four percentages.
    #[must_use]
    pub fn total(self) -> u16 {
        [self.first, self.second, self.third, self.fourth]
            .into_iter()
            .map(u16::from)
            .sum()
    }

    /// A split is only usable when it accounts for the whole payroll.
    #[must_use]
    pub fn is_balanced(self) -> bool {
        self.total() == 100
    }
}

impl Default for PaySplit {
    fn default() -> Self {
        Self {
            first: 100,
            second: 0,
            third: 0,
            fourth: 0,
        }
    }
}
