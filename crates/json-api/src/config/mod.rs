//! Server configuration module

use clap::Parser;

use planilla_app::quickbooks::QuickBooksArgs;

use crate::config::{
    auth::AuthConfig,
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
};

pub(crate) mod auth;
pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;

pub(crate) use observability::LogFormat;

/// Planilla JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "planilla-json", about = "Planilla JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// API key settings.
    #[command(flatten)]
    pub auth: AuthConfig,

    /// QuickBooks app settings.
    #[command(flatten)]
    pub quickbooks: QuickBooksArgs,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    const REQUIRED: [&str; 11] = [
        "planilla-json",
        "--database-url",
        "postgres://planilla@localhost/planilla",
        "--qbo-client-id",
        "client",
        "--qbo-client-secret",
        "secret",
        "--qbo-redirect-uri",
        "https://planilla.test/auth/callback",
        "--api-key-digests",
        "aa11,bb22",
    ];

    fn args(extra: &[&'static str]) -> Vec<&'static str> {
        let mut args = REQUIRED.to_vec();

        args.extend(extra);

        args
    }

    #[test]
    fn defaults_bind_every_interface_on_8698() -> TestResult {
        let config = ServerConfig::try_parse_from(args(&[]))?;

        assert_eq!(config.socket_addr(), "0.0.0.0:8698");
        assert_eq!(config.auth.api_key_digests, vec!["aa11", "bb22"]);
        assert!(!config.observability.otel_enabled, "otel should be opt-in");
        assert_eq!(config.server.shutdown_grace().as_secs(), 30);

        Ok(())
    }

    #[test]
    fn quickbooks_flags_are_flattened() -> TestResult {
        let config = ServerConfig::try_parse_from(args(&[
            "--qbo-environment",
            "production",
            "--qbo-minor-version",
            "70",
        ]))?;

        let quickbooks = config.quickbooks.into_config();

        assert_eq!(quickbooks.api_base, "https://quickbooks.api.intuit.com");
        assert_eq!(quickbooks.minor_version, 70);

        Ok(())
    }

    #[test]
    fn api_key_digests_are_required() {
        let result = ServerConfig::try_parse_from(REQUIRED.iter().copied().take(9));

        assert!(result.is_err(), "expected a missing API key error");
    }
}
