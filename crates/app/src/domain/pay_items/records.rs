//! Pay Item Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{domain::companies::records::CompanyUuid, uuids::TypedUuid};

/// Pay Item UUID
pub type PayItemUuid = TypedUuid<PayItemRecord>;

/// What a pay item does to an employee's pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayItemKind {
    /// Regular salary.
    Earning,

    /// Overtime, bonuses and other additions.
    Extra,

    /// Withheld from the employee; stored as a non-positive amount.
    Deduction,

    /// Paid by the employer on top of salary (social charges).
    EmployerContribution,
}

impl PayItemKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Earning => "earning",
            Self::Extra => "extra",
            Self::Deduction => "deduction",
            Self::EmployerContribution => "employer_contribution",
        }
    }

    /// Applies the sign convention for this kind, whatever sign the caller used.
    ///
    /// Deductions are stored `<= 0`; every other kind is stored `>= 0`.
    #[must_use]
    pub const fn normalise_amount(self, amount: i64) -> i64 {
        match self {
            Self::Deduction => amount.saturating_abs().saturating_neg(),
            Self::Earning | Self::Extra | Self::EmployerContribution => amount.saturating_abs(),
        }
    }
}

impl fmt::Display for PayItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown pay item kind: {0}")]
pub struct UnknownPayItemKind(pub String);

impl FromStr for PayItemKind {
    type Err = UnknownPayItemKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "earning" => Ok(Self::Earning),
            "extra" => Ok(Self::Extra),
            "deduction" => Ok(Self::Deduction),
            "employer_contribution" => Ok(Self::EmployerContribution),
            other => Err(UnknownPayItemKind(other.to_string())),
        }
    }
}

/// Pay Item Record
#[derive(Debug, Clone)]
pub struct PayItemRecord {
    pub uuid: PayItemUuid,
    pub company_uuid: CompanyUuid,

    /// Short code, unique per company.
    pub code: String,

    pub name: String,
    pub kind: PayItemKind,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}
