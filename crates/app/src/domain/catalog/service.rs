//! Catalog service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::civil::Date;
use mockall::automock;
use tracing::debug;

use crate::{
    domain::{
        catalog::{
            errors::CatalogServiceError,
            records::{ClassifiedTaxRate, SalesReport},
        },
        companies::records::CompanyUuid,
        connections::ConnectionsService,
    },
    quickbooks::{catalog::CatalogClient, models::Account},
    tariffs::{RateLookup, classify, summarize_sales},
};

/// Catalog reads authorised through the company's stored token.
#[derive(Clone)]
pub struct QuickBooksCatalogService {
    connections: Arc<dyn ConnectionsService>,
    client: Arc<dyn CatalogClient>,
}

impl std::fmt::Debug for QuickBooksCatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuickBooksCatalogService").finish_non_exhaustive()
    }
}

impl QuickBooksCatalogService {
    #[must_use]
    pub fn new(connections: Arc<dyn ConnectionsService>, client: Arc<dyn CatalogClient>) -> Self {
        Self {
            connections,
            client,
        }
    }
}

#[async_trait]
impl CatalogService for QuickBooksCatalogService {
    async fn accounts(&self, company: CompanyUuid) -> Result<Vec<Account>, CatalogServiceError> {
        let access = self.connections.valid_access_token(company).await?;

        Ok(self
            .client
            .accounts(&access.realm_id, &access.access_token)
            .await?)
    }

    async fn tax_rates(
        &self,
        company: CompanyUuid,
    ) -> Result<Vec<ClassifiedTaxRate>, CatalogServiceError> {
        let access = self.connections.valid_access_token(company).await?;

        let rates = self
            .client
            .tax_rates(&access.realm_id, &access.access_token)
            .await?;

        Ok(rates
            .into_iter()
            .map(|rate| ClassifiedTaxRate {
                tariff: classify(rate.rate_value, &rate.name),
                rate,
            })
            .collect())
    }

    async fn sales_summary(
        &self,
        company: CompanyUuid,
        from: Date,
        to: Date,
    ) -> Result<SalesReport, CatalogServiceError> {
        if from > to {
            return Err(CatalogServiceError::InvalidRange);
        }

        let access = self.connections.valid_access_token(company).await?;
        let (realm_id, token) = (access.realm_id.as_str(), access.access_token.as_str());

        let rates = self.client.tax_rates(realm_id, token).await?;
        let codes = self.client.tax_codes(realm_id, token).await?;
        let invoices = self.client.invoices(realm_id, token, from, to).await?;

        debug!(
            rates = rates.len(),
            codes = codes.len(),
            invoices = invoices.len(),
            "summarising sales"
        );

        let lookup = RateLookup::new(&rates, &codes);

        Ok(SalesReport {
            from,
            to,
            summary: summarize_sales(&invoices, &lookup),
        })
    }
}

#[automock]
#[async_trait]
/// QuickBooks catalog reads for a company.
pub trait CatalogService: Send + Sync {
    /// Chart of accounts.
    async fn accounts(&self, company: CompanyUuid) -> Result<Vec<Account>, CatalogServiceError>;

    /// Tax rates with their IVA tariff.
    async fn tax_rates(
        &self,
        company: CompanyUuid,
    ) -> Result<Vec<ClassifiedTaxRate>, CatalogServiceError>;

    /// Invoice sales per tariff for `from..=to`.
    async fn sales_summary(
        &self,
        company: CompanyUuid,
        from: Date,
        to: Date,
    ) -> Result<SalesReport, CatalogServiceError>;
}
