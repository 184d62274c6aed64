//! Connection Handlers

pub(crate) mod callback;
pub(crate) mod confirm;
pub(crate) mod connect;
pub(crate) mod disconnect;
pub(crate) mod pending;
