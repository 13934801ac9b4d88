//! Server configuration module

use clap::Parser;

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

/// Storefront JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "storefront-json", about = "Storefront JSON API Server", long_about = None)]
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

    /// Credential and token settings.
    #[command(flatten)]
    pub auth: AuthConfig,
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

    use super::{observability::LogFormat, *};

    #[test]
    fn parses_flags_with_defaults() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "storefront-json",
            "--database-url",
            "postgres://localhost/storefront",
            "--openbao-addr",
            "http://localhost:8200",
            "--openbao-token",
            "root",
            "--openbao-transit-key",
            "storefront",
        ])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:8698");
        assert_eq!(config.auth.token_ttl_days, 15);
        assert!(matches!(config.logging.log_format, LogFormat::Compact));

        Ok(())
    }
}
