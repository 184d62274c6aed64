//! Costa Rican IVA tariff classification.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    ops::RangeInclusive,
};

use serde::{Deserialize, Serialize};

mod attribution;

pub use attribution::{RateLookup, SalesSummary, summarize_sales};

/// IVA tariff a provider tax rate is reported under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tariff {
    #[serde(rename = "general-13")]
    General13,

    #[serde(rename = "reduced-4")]
    Reduced4,

    #[serde(rename = "reduced-2")]
    Reduced2,

    #[serde(rename = "reduced-1")]
    Reduced1,

    #[serde(rename = "exempt")]
    Exempt,
}

impl Tariff {
    /// Every tariff, in reporting order.
    pub const ALL: [Self; 5] = [
        Self::General13,
        Self::Reduced4,
        Self::Reduced2,
        Self::Reduced1,
        Self::Exempt,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::General13 => "general-13",
            Self::Reduced4 => "reduced-4",
            Self::Reduced2 => "reduced-2",
            Self::Reduced1 => "reduced-1",
            Self::Exempt => "exempt",
        }
    }
}

impl Display for Tariff {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.label())
    }
}

/// Checked in order; the first range holding the rate wins.
const RATE_BUCKETS: [(RangeInclusive<f64>, Tariff); 4] = [
    (12.5..=13.5, Tariff::General13),
    (3.5..=4.5, Tariff::Reduced4),
    (1.5..=2.5, Tariff::Reduced2),
    (0.5..=1.5, Tariff::Reduced1),
];

/// Checked in order against the lower-cased name.
const NAME_HINTS: [(&str, Tariff); 4] = [
    ("13", Tariff::General13),
    ("4", Tariff::Reduced4),
    ("2", Tariff::Reduced2),
    ("1", Tariff::Reduced1),
];

/// Classifies a provider tax rate by its percentage, falling back to its name
/// when the provider did not report one.
#[must_use]
pub fn classify(rate: Option<f64>, name: &str) -> Tariff {
    match rate {
        Some(rate) => classify_rate(rate),
        None => classify_name(name),
    }
}

fn classify_rate(rate: f64) -> Tariff {
    RATE_BUCKETS
        .iter()
        .find(|(bucket, _)| bucket.contains(&rate))
        .map_or(Tariff::Exempt, |(_, tariff)| *tariff)
}

fn classify_name(name: &str) -> Tariff {
    let name = name.to_lowercase();

    if name.contains("exento") || name.contains("exempt") {
        return Tariff::Exempt;
    }

    NAME_HINTS
        .iter()
        .find(|(hint, _)| name.contains(hint))
        .map_or(Tariff::Exempt, |(_, tariff)| *tariff)
}
