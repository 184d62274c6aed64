//! Pending connection store.

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as, types::Json};
use tracing::debug;

use crate::{
    domain::connections::records::{NewPendingConnection, PendingConnection},
    quickbooks::oauth::TokenGrant,
};

const PUT_PENDING_CONNECTION_SQL: &str = include_str!("sql/put_pending_connection.sql");
const GET_PENDING_CONNECTION_SQL: &str = include_str!("sql/get_pending_connection.sql");
const TAKE_PENDING_CONNECTION_SQL: &str = include_str!("sql/take_pending_connection.sql");
const PURGE_EXPIRED_PENDING_CONNECTIONS_SQL: &str =
    include_str!("sql/purge_expired_pending_connections.sql");

#[automock]
#[async_trait]
/// Short-lived records addressed by a correlation token.
pub trait PendingConnectionsStore: Send + Sync {
    /// Parks a connection, dropping any that already expired.
    async fn put(
        &self,
        pending: NewPendingConnection,
    ) -> Result<PendingConnection, sqlx::Error>;

    /// Reads an unexpired connection without consuming it.
    async fn get(&self, token: &str) -> Result<Option<PendingConnection>, sqlx::Error>;

    /// Removes and returns an unexpired connection. Only one caller wins.
    async fn take(&self, token: &str) -> Result<Option<PendingConnection>, sqlx::Error>;
}

/// PostgreSQL-backed pending connection store.
#[derive(Debug, Clone)]
pub struct PgPendingConnectionsStore {
    pool: PgPool,
}

impl PgPendingConnectionsStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PendingConnectionsStore for PgPendingConnectionsStore {
    async fn put(
        &self,
        pending: NewPendingConnection,
    ) -> Result<PendingConnection, sqlx::Error> {
        let purged = query(PURGE_EXPIRED_PENDING_CONNECTIONS_SQL)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if purged > 0 {
            debug!(purged, "purged expired pending connections");
        }

        query_as::<Postgres, PendingConnection>(PUT_PENDING_CONNECTION_SQL)
            .bind(pending.token)
            .bind(pending.realm_id)
            .bind(pending.company_name)
            .bind(pending.return_path)
            .bind(Json(pending.grant))
            .bind(SqlxTimestamp::from(pending.expires_at))
            .fetch_one(&self.pool)
            .await
    }

    async fn get(&self, token: &str) -> Result<Option<PendingConnection>, sqlx::Error> {
        query_as::<Postgres, PendingConnection>(GET_PENDING_CONNECTION_SQL)
            .bind(token)
            .fetch_optional(&self.pool)
            .await
    }

    async fn take(&self, token: &str) -> Result<Option<PendingConnection>, sqlx::Error> {
        query_as::<Postgres, PendingConnection>(TAKE_PENDING_CONNECTION_SQL)
            .bind(token)
            .fetch_optional(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for PendingConnection {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let Json(grant) = row.try_get::<Json<TokenGrant>, _>("grant_payload")?;

        Ok(Self {
            token: row.try_get("token")?,
            realm_id: row.try_get("realm_id")?,
            company_name: row.try_get("company_name")?,
            return_path: row.try_get("return_path")?,
            grant,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            expires_at: row.try_get::<SqlxTimestamp, _>("expires_at")?.to_jiff(),
        })
    }
}
