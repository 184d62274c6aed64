//! Catalog Handlers

pub(crate) mod accounts;
pub(crate) mod sales_summary;
pub(crate) mod tax_rates;
