//! Shared test infrastructure.

mod db;
mod helpers;

pub(crate) use context::TestContext;
pub(crate) use db::TestDb;
pub(crate) use helpers::{new_company, new_employee, new_pay_item, new_pay_period};
