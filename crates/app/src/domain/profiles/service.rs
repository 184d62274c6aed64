//! Company profiles service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::domain::{
    companies::{CompaniesService, records::CompanyUuid},
    profiles::{errors::CompanyProfilesError, records::CompanyProfile, store::CompanyProfileStore},
};

/// Resolves a company's realm and reads or writes its profile.
#[derive(Clone)]
pub struct RealmCompanyProfilesService {
    companies: Arc<dyn CompaniesService>,
    store: Arc<dyn CompanyProfileStore>,
}

impl std::fmt::Debug for RealmCompanyProfilesService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealmCompanyProfilesService")
            .finish_non_exhaustive()
    }
}

impl RealmCompanyProfilesService {
    #[must_use]
    pub fn new(companies: Arc<dyn CompaniesService>, store: Arc<dyn CompanyProfileStore>) -> Self {
        Self { companies, store }
    }

    async fn realm_of(&self, company: CompanyUuid) -> Result<String, CompanyProfilesError> {
        self.companies
            .get_company(company)
            .await?
            .realm_id
            .ok_or(CompanyProfilesError::MissingRealm)
    }
}

#[async_trait]
impl CompanyProfilesService for RealmCompanyProfilesService {
    async fn load_profile(
        &self,
        company: CompanyUuid,
    ) -> Result<CompanyProfile, CompanyProfilesError> {
        let realm_id = self.realm_of(company).await?;

        Ok(self.store.load(&realm_id).await?.unwrap_or_default())
    }

    async fn save_profile(
        &self,
        company: CompanyUuid,
        profile: CompanyProfile,
    ) -> Result<CompanyProfile, CompanyProfilesError> {
        profile.validate()?;

        let realm_id = self.realm_of(company).await?;

        self.store.save(&realm_id, profile).await
    }
}

#[automock]
#[async_trait]
pub trait CompanyProfilesService: Send + Sync {
    /// Saved profile, or the default one when nothing was saved yet.
    async fn load_profile(
        &self,
        company: CompanyUuid,
    ) -> Result<CompanyProfile, CompanyProfilesError>;

    /// Validates and replaces the company's profile.
    async fn save_profile(
        &self,
        company: CompanyUuid,
        profile: CompanyProfile,
    ) -> Result<CompanyProfile, CompanyProfilesError>;
}
