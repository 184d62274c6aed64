//! QuickBooks Connections
//!
//! The OAuth consent round trip, pending connections waiting for an operator
//! and disconnecting companies.

pub(crate) mod errors;
mod handlers;

pub(crate) use handlers::*;
