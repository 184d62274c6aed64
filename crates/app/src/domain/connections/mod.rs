//! QuickBooks connections: stored tokens, issued states, pending connections
//! and the OAuth lifecycle.

pub mod errors;
pub mod pending;
pub mod records;
pub mod service;
pub mod states;
pub mod tokens;

pub use errors::ConnectionsServiceError;
pub use pending::{PendingConnectionsStore, PgPendingConnectionsStore};
pub use service::*;
pub use states::{AuthorizationStateStore, PgAuthorizationStateStore};
pub use tokens::{PgTokenStore, TokenStore};
