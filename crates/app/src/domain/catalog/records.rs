//! Catalog Records

use jiff::civil::Date;

use crate::{
    quickbooks::models::TaxRate,
    tariffs::{SalesSummary, Tariff},
};

/// A provider tax rate and the tariff it reports under.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedTaxRate {
    pub rate: TaxRate,
    pub tariff: Tariff,
}

/// Taxable sales per tariff for `from..=to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesReport {
    pub from: Date,
    pub to: Date,
    pub summary: SalesSummary,
}
