//! Planilla Domain Concerns

pub mod catalog;
pub mod companies;
pub mod connections;
pub mod employees;
pub mod pay_items;
pub mod pay_periods;
pub mod profiles;
