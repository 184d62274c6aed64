//! Planilla application: payroll records, QuickBooks connections and IVA
//! tariff classification.

pub mod context;
pub mod database;
pub mod domain;
pub mod quickbooks;
pub mod tariffs;

#[cfg(test)]
mod test;

mod uuids;

pub use uuids::TypedUuid;
