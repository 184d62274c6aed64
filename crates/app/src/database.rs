//! Database connection management

use async_trait::async_trait;
use mockall::automock;
use sqlx::{PgPool, Postgres, Transaction, query, query_as};
use thiserror::Error;
use tracing::warn;

use crate::domain::companies::records::CompanyUuid;

/// SQL used to set company context for row-level security.
pub const SET_COMPANY_CONTEXT_SQL: &str =
    "SELECT set_config('app.current_company_uuid', $1, true)";

const CURRENT_ROLE_FLAGS_SQL: &str =
    "SELECT rolsuper, rolbypassrls FROM pg_roles WHERE rolname = current_user";

const PING_SQL: &str = "SELECT 1";

/// Reachability of the application database, reported by the healthcheck.
#[automock]
#[async_trait]
pub trait DatabaseHealth: Send + Sync {
    /// Round-trips a trivial query through the pool.
    async fn ping(&self) -> Result<(), sqlx::Error>;
}

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Begin a transaction and set company context for RLS policies.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction or setting company context fails.
    pub async fn begin_company_transaction(
        &self,
        company: CompanyUuid,
    ) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        query(SET_COMPANY_CONTEXT_SQL)
            .bind(company.into_uuid().to_string())
            .execute(&mut *tx)
            .await?;

        Ok(tx)
    }
}

#[async_trait]
impl DatabaseHealth for Db {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        query(PING_SQL).execute(&self.pool).await?;

        Ok(())
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

#[derive(Debug, Error)]
pub enum RlsRoleError {
    #[error("database role bypasses row-level security (superuser or BYPASSRLS)")]
    BypassesRls,

    #[error("failed to inspect database role")]
    Sql(#[from] sqlx::Error),
}

/// Refuse to run with a role that would silently ignore company isolation.
///
/// # Errors
///
/// Returns an error when the connected role is a superuser or has `BYPASSRLS`.
pub async fn ensure_rls_enforced_role(pool: &PgPool) -> Result<(), RlsRoleError> {
    let (superuser, bypass_rls): (bool, bool) =
        query_as(CURRENT_ROLE_FLAGS_SQL).fetch_one(pool).await?;

    if superuser || bypass_rls {
        warn!(superuser, bypass_rls, "connected role bypasses row-level security");

        return Err(RlsRoleError::BypassesRls);
    }

    Ok(())
}
