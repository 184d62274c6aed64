//! Auth Config

use clap::Args;

/// API key authentication settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Hex-encoded SHA-256 digests of accepted API keys, comma separated
    #[arg(
        long,
        env = "API_KEY_DIGESTS",
        value_delimiter = ',',
        required = true,
        hide_env_values = true
    )]
    pub api_key_digests: Vec<String>,
}
