//! QuickBooks configuration.

use clap::{Args, ValueEnum};

use crate::quickbooks::secret::ClientSecret;

pub const DEFAULT_AUTHORIZE_URL: &str = "https://appcenter.intuit.com/connect/oauth2";
pub const DEFAULT_TOKEN_URL: &str = "https://oauth.platform.intuit.com/oauth2/v1/tokens/bearer";
pub const DEFAULT_REVOKE_URL: &str = "https://developer.api.intuit.com/v2/oauth2/tokens/revoke";
pub const SANDBOX_API_BASE: &str = "https://sandbox-quickbooks.api.intuit.com";
pub const PRODUCTION_API_BASE: &str = "https://quickbooks.api.intuit.com";
pub const DEFAULT_SCOPE: &str = "com.intuit.quickbooks.accounting";
pub const DEFAULT_MINOR_VERSION: u32 = 75;

/// Which QuickBooks API host to talk to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    #[default]
    Sandbox,
    Production,
}

impl Environment {
    #[must_use]
    pub const fn api_base(self) -> &'static str {
        match self {
            Self::Sandbox => SANDBOX_API_BASE,
            Self::Production => PRODUCTION_API_BASE,
        }
    }
}

/// Resolved QuickBooks app settings.
#[derive(Debug, Clone)]
pub struct QuickBooksConfig {
    pub client_id: String,
    pub client_secret: ClientSecret,

    /// Where the provider sends the user back after consent.
    pub redirect_uri: String,

    pub scope: String,
    pub authorize_url: String,
    pub token_url: String,
    pub revoke_url: String,

    /// Accounting API host, without a trailing slash.
    pub api_base: String,

    pub minor_version: u32,

    /// How long an unconfirmed connection is kept, in seconds.
    pub pending_ttl_seconds: i64,
}

impl QuickBooksConfig {
    /// Settings with the public Intuit endpoints for `environment`.
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        client_secret: ClientSecret,
        redirect_uri: impl Into<String>,
        environment: Environment,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret,
            redirect_uri: redirect_uri.into(),
            scope: DEFAULT_SCOPE.to_string(),
            authorize_url: DEFAULT_AUTHORIZE_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            revoke_url: DEFAULT_REVOKE_URL.to_string(),
            api_base: environment.api_base().to_string(),
            minor_version: DEFAULT_MINOR_VERSION,
            pending_ttl_seconds: 15 * 60,
        }
    }
}

/// QuickBooks settings from CLI flags or the environment.
#[derive(Debug, Args)]
pub struct QuickBooksArgs {
    /// QuickBooks app client id
    #[arg(long = "qbo-client-id", env = "QBO_CLIENT_ID")]
    pub client_id: String,

    /// QuickBooks app client secret
    #[arg(long = "qbo-client-secret", env = "QBO_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: String,

    /// OAuth redirect URI registered with the app
    #[arg(long = "qbo-redirect-uri", env = "QBO_REDIRECT_URI")]
    pub redirect_uri: String,

    /// API environment (sandbox, production)
    #[arg(long = "qbo-environment", env = "QBO_ENVIRONMENT", value_enum, default_value_t = Environment::Sandbox)]
    pub environment: Environment,

    /// OAuth scopes, space separated
    #[arg(long = "qbo-scope", env = "QBO_SCOPE", default_value = DEFAULT_SCOPE)]
    pub scope: String,

    /// Authorization endpoint
    #[arg(long = "qbo-authorize-url", env = "QBO_AUTHORIZE_URL", default_value = DEFAULT_AUTHORIZE_URL)]
    pub authorize_url: String,

    /// Token endpoint
    #[arg(long = "qbo-token-url", env = "QBO_TOKEN_URL", default_value = DEFAULT_TOKEN_URL)]
    pub token_url: String,

    /// Revocation endpoint
    #[arg(long = "qbo-revoke-url", env = "QBO_REVOKE_URL", default_value = DEFAULT_REVOKE_URL)]
    pub revoke_url: String,

    /// Overrides the API host picked by the environment
    #[arg(long = "qbo-api-base", env = "QBO_API_BASE")]
    pub api_base: Option<String>,

    /// Accounting API minor version
    #[arg(long = "qbo-minor-version", env = "QBO_MINOR_VERSION", default_value_t = DEFAULT_MINOR_VERSION)]
    pub minor_version: u32,

    /// Lifetime of unconfirmed connections in seconds
    #[arg(long = "qbo-pending-ttl-seconds", env = "QBO_PENDING_TTL_SECONDS", default_value_t = 900)]
    pub pending_ttl_seconds: i64,
}

impl QuickBooksArgs {
    #[must_use]
    pub fn into_config(self) -> QuickBooksConfig {
        let api_base = self
            .api_base
            .unwrap_or_else(|| self.environment.api_base().to_string())
            .trim_end_matches('/')
            .to_string();

        QuickBooksConfig {
            client_id: self.client_id,
            client_secret: ClientSecret::new(self.client_secret),
            redirect_uri: self.redirect_uri,
            scope: self.scope,
            authorize_url: self.authorize_url,
            token_url: self.token_url,
            revoke_url: self.revoke_url,
            api_base,
            minor_version: self.minor_version,
            pending_ttl_seconds: self.pending_ttl_seconds,
        }
    }
}
