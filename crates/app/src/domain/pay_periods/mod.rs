//! Pay Periods
//!
//! A pay period owns the pay events recorded against it and the pay run
//! computed from those events.

pub mod data;
pub mod errors;
pub mod records;
mod repositories;
pub mod service;
pub mod totals;

pub use errors::PayPeriodsServiceError;
pub use service::*;
