//! QuickBooks accounting API client.

use async_trait::async_trait;
use jiff::civil::Date;
use mockall::automock;
use reqwest::{Client, header::ACCEPT};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::quickbooks::{
    config::QuickBooksConfig,
    errors::QuickBooksError,
    models::{Account, CompanyInfo, CompanyInfoResponse, Invoice, TaxCode, TaxRate},
};

/// Largest page the query endpoint returns.
pub const MAX_PAGE_SIZE: u32 = 1000;

#[automock]
#[async_trait]
/// Read access to a connected company's catalogs.
pub trait CatalogClient: Send + Sync {
    /// Chart of accounts.
    async fn accounts(
        &self,
        realm_id: &str,
        access_token: &str,
    ) -> Result<Vec<Account>, QuickBooksError>;

    async fn tax_rates(
        &self,
        realm_id: &str,
        access_token: &str,
    ) -> Result<Vec<TaxRate>, QuickBooksError>;

    async fn tax_codes(
        &self,
        realm_id: &str,
        access_token: &str,
    ) -> Result<Vec<TaxCode>, QuickBooksError>;

    /// Invoices dated within `from..=to`.
    async fn invoices(
        &self,
        realm_id: &str,
        access_token: &str,
        from: Date,
        to: Date,
    ) -> Result<Vec<Invoice>, QuickBooksError>;

    async fn company_info(
        &self,
        realm_id: &str,
        access_token: &str,
    ) -> Result<CompanyInfo, QuickBooksError>;
}

/// HTTP client for `/v3/company/{realm}` endpoints.
#[derive(Debug, Clone)]
pub struct QuickBooksApiClient {
    http: Client,
    api_base: String,
    minor_version: u32,
    page_size: u32,
}

impl QuickBooksApiClient {
    #[must_use]
    pub fn new(config: &QuickBooksConfig, http: Client) -> Self {
        Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            minor_version: config.minor_version,
            page_size: MAX_PAGE_SIZE,
        }
    }

    /// Overrides the query page size, capped at [`MAX_PAGE_SIZE`].
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    async fn get(
        &self,
        realm_id: &str,
        access_token: &str,
        resource: &str,
        query: Option<&str>,
    ) -> Result<Value, QuickBooksError> {
        let url = format!("{}/v3/company/{realm_id}/{resource}", self.api_base);
        let minor_version = self.minor_version.to_string();

        let mut request = self
            .http
            .get(url)
            .bearer_auth(access_token)
            .header(ACCEPT, "application/json")
            .query(&[("minorversion", minor_version.as_str())]);

        if let Some(query) = query {
            request = request.query(&[("query", query)]);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(QuickBooksError::from_response(response).await);
        }

        Ok(response.json().await?)
    }

    /// Runs `SELECT * FROM {entity}` page by page until a short page.
    async fn query_all<T: DeserializeOwned>(
        &self,
        realm_id: &str,
        access_token: &str,
        entity: &str,
        filter: Option<&str>,
    ) -> Result<Vec<T>, QuickBooksError> {
        let mut rows = Vec::new();
        let mut start_position: u32 = 1;

        loop {
            let statement = match filter {
                Some(filter) => format!(
                    "SELECT * FROM {entity} WHERE {filter} STARTPOSITION {start_position} MAXRESULTS {}",
                    self.page_size
                ),
                None => format!(
                    "SELECT * FROM {entity} STARTPOSITION {start_position} MAXRESULTS {}",
                    self.page_size
                ),
            };

            let mut body = self
                .get(realm_id, access_token, "query", Some(&statement))
                .await?;

            let page: Vec<T> = match body
                .get_mut("QueryResponse")
                .and_then(|response| response.get_mut(entity))
            {
                Some(entities) => serde_json::from_value(entities.take())?,
                None => Vec::new(),
            };

            let fetched = page.len();

            debug!(entity, start_position, fetched, "fetched query page");

            rows.extend(page);

            if fetched < self.page_size as usize {
                return Ok(rows);
            }

            start_position = start_position.saturating_add(self.page_size);
        }
    }
}

#[async_trait]
impl CatalogClient for QuickBooksApiClient {
    async fn accounts(
        &self,
        realm_id: &str,
        access_token: &str,
    ) -> Result<Vec<Account>, QuickBooksError> {
        self.query_all(realm_id, access_token, "Account", None).await
    }

    async fn tax_rates(
        &self,
        realm_id: &str,
        access_token: &str,
    ) -> Result<Vec<TaxRate>, QuickBooksError> {
        self.query_all(realm_id, access_token, "TaxRate", None).await
    }

    async fn tax_codes(
        &self,
        realm_id: &str,
        access_token: &str,
    ) -> Result<Vec<TaxCode>, QuickBooksError> {
        self.query_all(realm_id, access_token, "TaxCode", None).await
    }

    async fn invoices(
        &self,
        realm_id: &str,
        access_token: &str,
        from: Date,
        to: Date,
    ) -> Result<Vec<Invoice>, QuickBooksError> {
        let filter = format!("TxnDate >= '{from}' AND TxnDate <= '{to}'");

        self.query_all(realm_id, access_token, "Invoice", Some(&filter))
            .await
    }

    async fn company_info(
        &self,
        realm_id: &str,
        access_token: &str,
    ) -> Result<CompanyInfo, QuickBooksError> {
        let resource = format!("companyinfo/{realm_id}");

        let body = self.get(realm_id, access_token, &resource, None).await?;
        let parsed: CompanyInfoResponse = serde_json::from_value(body)?;

        Ok(parsed.company_info)
    }
}
