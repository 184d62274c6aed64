//! Server Config

use std::{net::Ipv6Addr, time::Duration};

use clap::Args;

/// Server runtime network settings.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Server host address or IP literal
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "SERVER_PORT", default_value = "8698")]
    pub port: u16,

    /// Seconds in-flight requests (pay runs, QuickBooks calls) get to finish
    /// after SIGTERM or Ctrl+C
    #[arg(
        long,
        env = "SHUTDOWN_GRACE_SECS",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(0..=300)
    )]
    pub shutdown_grace_secs: u64,
}

impl ServerRuntimeConfig {
    /// Bind address; IPv6 literals are bracketed.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        let host = self.host.trim_start_matches('[').trim_end_matches(']');

        if host.parse::<Ipv6Addr>().is_ok() {
            format!("[{host}]:{}", self.port)
        } else {
            format!("{host}:{}", self.port)
        }
    }

    #[must_use]
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}
