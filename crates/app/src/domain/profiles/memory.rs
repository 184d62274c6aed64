//! Process-local company profile store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::profiles::{
    errors::CompanyProfilesError, records::CompanyProfile, store::CompanyProfileStore,
};

/// Keeps profiles in memory for the lifetime of the process.
///
/// Nothing is shared between processes; use the PostgreSQL store for servers.
#[derive(Debug, Default)]
pub struct InMemoryCompanyProfileStore {
    profiles: RwLock<HashMap<String, CompanyProfile>>,
}

impl InMemoryCompanyProfileStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CompanyProfileStore for InMemoryCompanyProfileStore {
    async fn load(&self, realm_id: &str) -> Result<Option<CompanyProfile>, CompanyProfilesError> {
        Ok(self.profiles.read().await.get(realm_id).cloned())
    }

    async fn save(
        &self,
        realm_id: &str,
        profile: CompanyProfile,
    ) -> Result<CompanyProfile, CompanyProfilesError> {
        profile.validate()?;

        self.profiles
            .write()
            .await
            .insert(realm_id.to_string(), profile.clone());

        Ok(profile)
    }
}
