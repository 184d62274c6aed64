//! Durable company profile store.

use async_trait::async_trait;
use mockall::automock;
use serde_json::Value;
use sqlx::{PgPool, query, query_scalar, types::Json};

use crate::domain::profiles::{errors::CompanyProfilesError, records::CompanyProfile};

const GET_COMPANY_PROFILE_SQL: &str = include_str!("sql/get_company_profile.sql");
const UPSERT_COMPANY_PROFILE_SQL: &str = include_str!("sql/upsert_company_profile.sql");

#[automock]
#[async_trait]
/// Loads and saves whole company profiles by realm id.
pub trait CompanyProfileStore: Send + Sync {
    /// Returns the saved profile, or `None` when nothing was saved for the realm.
    async fn load(&self, realm_id: &str) -> Result<Option<CompanyProfile>, CompanyProfilesError>;

    /// Validates and replaces the realm's profile.
    async fn save(
        &self,
        realm_id: &str,
        profile: CompanyProfile,
    ) -> Result<CompanyProfile, CompanyProfilesError>;
}

/// PostgreSQL `jsonb` profile store.
#[derive(Debug, Clone)]
pub struct PgCompanyProfileStore {
    pool: PgPool,
}

impl PgCompanyProfileStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompanyProfileStore for PgCompanyProfileStore {
    async fn load(&self, realm_id: &str) -> Result<Option<CompanyProfile>, CompanyProfilesError> {
        let blob: Option<Json<Value>> = query_scalar(GET_COMPANY_PROFILE_SQL)
            .bind(realm_id)
            .fetch_optional(&self.pool)
            .await?;

        blob.map(|Json(value)| serde_json::from_value(value))
            .transpose()
            .map_err(CompanyProfilesError::Decode)
    }

    async fn save(
        &self,
        realm_id: &str,
        profile: CompanyProfile,
    ) -> Result<CompanyProfile, CompanyProfilesError> {
        profile.validate()?;

        query(UPSERT_COMPANY_PROFILE_SQL)
            .bind(realm_id)
            .bind(Json(&profile))
            .execute(&self.pool)
            .await?;

        Ok(profile)
    }
}
