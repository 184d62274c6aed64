//! App Context

use std::{sync::Arc, time::Duration};

use jiff::SignedDuration;
use reqwest::Client;
use sqlx::PgPool;
use thiserror::Error;

use crate::{
    database::{self, DatabaseHealth, Db, RlsRoleError},
    domain::{
        catalog::{CatalogService, QuickBooksCatalogService},
        companies::{CompaniesService, PgCompaniesService},
        connections::{
            ConnectionsDeps, ConnectionsService, PgAuthorizationStateStore,
            PgPendingConnectionsStore, PgTokenStore, QuickBooksConnectionsService,
        },
        employees::{EmployeesService, PgEmployeesService},
        pay_items::{PayItemsService, PgPayItemsService},
        pay_periods::{PayPeriodsService, PgPayPeriodsService},
        profiles::{CompanyProfilesService, PgCompanyProfileStore, RealmCompanyProfilesService},
    },
    quickbooks::{CatalogClient, IntuitOAuthClient, QuickBooksApiClient, QuickBooksConfig},
};

/// Timeout for every outbound QuickBooks call.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("database role is not safe for the application")]
    Role(#[source] RlsRoleError),

    #[error("failed to build http client")]
    HttpClient(#[source] reqwest::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub database: Arc<dyn DatabaseHealth>,
    pub companies: Arc<dyn CompaniesService>,
    pub employees: Arc<dyn EmployeesService>,
    pub pay_items: Arc<dyn PayItemsService>,
    pub pay_periods: Arc<dyn PayPeriodsService>,
    pub profiles: Arc<dyn CompanyProfilesService>,
    pub connections: Arc<dyn ConnectionsService>,
    pub catalog: Arc<dyn CatalogService>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails or the
    /// connected role would bypass row-level security.
    pub async fn from_database_url(
        url: &str,
        quickbooks: QuickBooksConfig,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::ensure_rls_enforced_role(&pool)
            .await
            .map_err(AppInitError::Role)?;

        Self::new(pool, quickbooks)
    }

    /// Wire services over an existing pool.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(pool: PgPool, quickbooks: QuickBooksConfig) -> Result<Self, AppInitError> {
        let http = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(AppInitError::HttpClient)?;

        let db = Db::new(pool.clone());

        let companies: Arc<dyn CompaniesService> = Arc::new(PgCompaniesService::new(pool.clone()));

        let catalog_client: Arc<dyn CatalogClient> =
            Arc::new(QuickBooksApiClient::new(&quickbooks, http.clone()));

        let pending_ttl = SignedDuration::from_secs(quickbooks.pending_ttl_seconds);

        let connections: Arc<dyn ConnectionsService> =
            Arc::new(QuickBooksConnectionsService::new(ConnectionsDeps {
                companies: Arc::clone(&companies),
                tokens: Arc::new(PgTokenStore::new(pool.clone())),
                states: Arc::new(PgAuthorizationStateStore::new(pool.clone())),
                pending: Arc::new(PgPendingConnectionsStore::new(pool.clone())),
                oauth: Arc::new(IntuitOAuthClient::new(quickbooks, http)),
                catalog: Arc::clone(&catalog_client),
                pending_ttl,
            }));

        Ok(Self {
            database: Arc::new(db.clone()),
            employees: Arc::new(PgEmployeesService::new(db.clone())),
            pay_items: Arc::new(PgPayItemsService::new(db.clone())),
            pay_periods: Arc::new(PgPayPeriodsService::new(db)),
            profiles: Arc::new(RealmCompanyProfilesService::new(
                Arc::clone(&companies),
                Arc::new(PgCompanyProfileStore::new(pool)),
            )),
            catalog: Arc::new(QuickBooksCatalogService::new(
                Arc::clone(&connections),
                catalog_client,
            )),
            connections,
            companies,
        })
    }
}
