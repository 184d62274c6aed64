//! Authentication

mod keys;
pub(crate) mod middleware;

pub(crate) use keys::*;
