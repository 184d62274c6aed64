//! QuickBooks Online integration: OAuth2 token exchange and the accounting API.

pub mod catalog;
pub mod config;
pub mod errors;
pub mod models;
pub mod oauth;
pub mod secret;
pub mod state;

pub use catalog::{CatalogClient, QuickBooksApiClient};
pub use config::{Environment, QuickBooksArgs, QuickBooksConfig};
pub use errors::QuickBooksError;
pub use oauth::{IntuitOAuthClient, OAuthExchange, TokenGrant};
pub use secret::ClientSecret;
