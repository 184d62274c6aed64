//! Issued OAuth `state` values awaiting their callback.

use async_trait::async_trait;
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{PgPool, Row, query};
use tracing::debug;
use uuid::Uuid;

use crate::{domain::companies::records::CompanyUuid, quickbooks::state::OAuthState};

const ISSUE_OAUTH_STATE_SQL: &str = include_str!("sql/issue_oauth_state.sql");
const REDEEM_OAUTH_STATE_SQL: &str = include_str!("sql/redeem_oauth_state.sql");
const PURGE_EXPIRED_OAUTH_STATES_SQL: &str = include_str!("sql/purge_expired_oauth_states.sql");

#[automock]
#[async_trait]
/// Server-side record of every `state` handed to the consent screen.
pub trait AuthorizationStateStore: Send + Sync {
    /// Remembers `state` until `expires_at`.
    async fn issue(&self, state: &OAuthState, expires_at: Timestamp) -> Result<(), sqlx::Error>;

    /// Removes and returns the unexpired state issued under `nonce`.
    async fn redeem(&self, nonce: &str) -> Result<Option<OAuthState>, sqlx::Error>;
}

/// PostgreSQL-backed authorization state store.
#[derive(Debug, Clone)]
pub struct PgAuthorizationStateStore {
    pool: PgPool,
}

impl PgAuthorizationStateStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorizationStateStore for PgAuthorizationStateStore {
    async fn issue(&self, state: &OAuthState, expires_at: Timestamp) -> Result<(), sqlx::Error> {
        let purged = query(PURGE_EXPIRED_OAUTH_STATES_SQL)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if purged > 0 {
            debug!(purged, "purged expired oauth states");
        }

        query(ISSUE_OAUTH_STATE_SQL)
            .bind(&state.nonce)
            .bind(&state.return_path)
            .bind(state.company.map(CompanyUuid::into_uuid))
            .bind(SqlxTimestamp::from(expires_at))
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn redeem(&self, nonce: &str) -> Result<Option<OAuthState>, sqlx::Error> {
        let Some(row) = query(REDEEM_OAUTH_STATE_SQL)
            .bind(nonce)
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };

        Ok(Some(OAuthState {
            nonce: row.try_get("nonce")?,
            return_path: row.try_get("return_path")?,
            company: row
                .try_get::<Option<Uuid>, _>("company_uuid")?
                .map(CompanyUuid::from_uuid),
        }))
    }
}
