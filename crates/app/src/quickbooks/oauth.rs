//! Intuit OAuth2 token endpoint client.

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use reqwest::{Client, Url, header::ACCEPT};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::quickbooks::{config::QuickBooksConfig, errors::QuickBooksError};

/// Tokens issued by the provider, with absolute expiry times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub scope: Option<String>,
    pub expires_at: Timestamp,
    pub refresh_token_expires_at: Option<Timestamp>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default = "default_token_type")]
    token_type: String,
    #[serde(default)]
    scope: Option<String>,
    expires_in: i64,
    #[serde(default)]
    x_refresh_token_expires_in: Option<i64>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

fn after_seconds(now: Timestamp, seconds: i64) -> Timestamp {
    now.checked_add(SignedDuration::from_secs(seconds))
        .unwrap_or(Timestamp::MAX)
}

impl TokenResponse {
    fn into_grant(self, now: Timestamp) -> TokenGrant {
        TokenGrant {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            token_type: self.token_type,
            scope: self.scope,
            expires_at: after_seconds(now, self.expires_in),
            refresh_token_expires_at: self
                .x_refresh_token_expires_in
                .map(|seconds| after_seconds(now, seconds)),
        }
    }
}

#[automock]
#[async_trait]
/// OAuth2 operations against the provider.
pub trait OAuthExchange: Send + Sync {
    /// Builds the consent URL the user is redirected to.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured authorization endpoint is not a URL.
    fn authorization_url(&self, state: &str) -> Result<String, QuickBooksError>;

    /// Swaps an authorization code for a token pair.
    ///
    /// The provider does not return the realm id here; callers take it from the
    /// callback query.
    async fn exchange_code(&self, code: &str) -> Result<TokenGrant, QuickBooksError>;

    /// Obtains a fresh access token. The refresh token may be rotated.
    async fn refresh(&self, refresh_token: &str) -> Result<TokenGrant, QuickBooksError>;

    /// Revokes a refresh (or access) token.
    async fn revoke(&self, token: &str) -> Result<(), QuickBooksError>;
}

/// HTTP client for the Intuit OAuth2 endpoints.
#[derive(Debug, Clone)]
pub struct IntuitOAuthClient {
    config: QuickBooksConfig,
    http: Client,
}

impl IntuitOAuthClient {
    #[must_use]
    pub fn new(config: QuickBooksConfig, http: Client) -> Self {
        Self { config, http }
    }

    async fn token_request(&self, form: &[(&str, &str)]) -> Result<TokenGrant, QuickBooksError> {
        let response = self
            .http
            .post(&self.config.token_url)
            .basic_auth(
                &self.config.client_id,
                Some(self.config.client_secret.expose()),
            )
            .header(ACCEPT, "application/json")
            .form(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(QuickBooksError::from_response(response).await);
        }

        let parsed: TokenResponse = response.json().await?;

        Ok(parsed.into_grant(Timestamp::now()))
    }
}

#[async_trait]
impl OAuthExchange for IntuitOAuthClient {
    fn authorization_url(&self, state: &str) -> Result<String, QuickBooksError> {
        let url = Url::parse_with_params(
            &self.config.authorize_url,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("response_type", "code"),
                ("scope", self.config.scope.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("state", state),
                ("prompt", "consent"),
            ],
        )
        .map_err(|e| QuickBooksError::InvalidUrl(e.to_string()))?;

        Ok(url.into())
    }

    async fn exchange_code(&self, code: &str) -> Result<TokenGrant, QuickBooksError> {
        debug!("exchanging authorization code");

        self.token_request(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.config.redirect_uri.as_str()),
        ])
        .await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenGrant, QuickBooksError> {
        debug!("refreshing access token");

        self.token_request(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .await
    }

    async fn revoke(&self, token: &str) -> Result<(), QuickBooksError> {
        let response = self
            .http
            .post(&self.config.revoke_url)
            .basic_auth(
                &self.config.client_id,
                Some(self.config.client_secret.expose()),
            )
            .header(ACCEPT, "application/json")
            .json(&serde_json::json!({ "token": token }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(QuickBooksError::from_response(response).await);
        }

        Ok(())
    }
}
