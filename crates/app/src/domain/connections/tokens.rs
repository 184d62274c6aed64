//! OAuth token store.

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    domain::{
        companies::records::CompanyUuid,
        connections::records::{OAuthTokenUuid, StoredToken},
    },
    quickbooks::oauth::TokenGrant,
};

const FIND_TOKEN_SQL: &str = include_str!("sql/find_token.sql");
const UPSERT_TOKEN_SQL: &str = include_str!("sql/upsert_token.sql");
const DELETE_TOKEN_SQL: &str = include_str!("sql/delete_token.sql");

#[automock]
#[async_trait]
/// One token row per company.
pub trait TokenStore: Send + Sync {
    /// Loads the company's token together with its current realm id.
    async fn find_token(&self, company: CompanyUuid) -> Result<Option<StoredToken>, sqlx::Error>;

    /// Inserts or replaces the company's token.
    async fn save_token(&self, company: CompanyUuid, grant: &TokenGrant)
    -> Result<(), sqlx::Error>;

    /// Forgets the company's token. Returns the number of rows removed.
    async fn delete_token(&self, company: CompanyUuid) -> Result<u64, sqlx::Error>;
}

/// PostgreSQL-backed token store.
#[derive(Debug, Clone)]
pub struct PgTokenStore {
    pool: PgPool,
}

impl PgTokenStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenStore for PgTokenStore {
    async fn find_token(&self, company: CompanyUuid) -> Result<Option<StoredToken>, sqlx::Error> {
        query_as::<Postgres, StoredToken>(FIND_TOKEN_SQL)
            .bind(company.into_uuid())
            .fetch_optional(&self.pool)
            .await
    }

    async fn save_token(
        &self,
        company: CompanyUuid,
        grant: &TokenGrant,
    ) -> Result<(), sqlx::Error> {
        query(UPSERT_TOKEN_SQL)
            .bind(Uuid::now_v7())
            .bind(company.into_uuid())
            .bind(&grant.access_token)
            .bind(&grant.refresh_token)
            .bind(&grant.token_type)
            .bind(grant.scope.as_deref())
            .bind(SqlxTimestamp::from(grant.expires_at))
            .bind(grant.refresh_token_expires_at.map(SqlxTimestamp::from))
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_token(&self, company: CompanyUuid) -> Result<u64, sqlx::Error> {
        let result = query(DELETE_TOKEN_SQL)
            .bind(company.into_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

impl<'r> FromRow<'r, PgRow> for StoredToken {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OAuthTokenUuid::from_uuid(row.try_get("uuid")?),
            company_uuid: CompanyUuid::from_uuid(row.try_get("company_uuid")?),
            realm_id: row.try_get("realm_id")?,
            grant: TokenGrant {
                access_token: row.try_get("access_token")?,
                refresh_token: row.try_get("refresh_token")?,
                token_type: row.try_get("token_type")?,
                scope: row.try_get("scope")?,
                expires_at: row.try_get::<SqlxTimestamp, _>("expires_at")?.to_jiff(),
                refresh_token_expires_at: row
                    .try_get::<Option<SqlxTimestamp>, _>("refresh_token_expires_at")?
                    .map(SqlxTimestamp::to_jiff),
            },
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
