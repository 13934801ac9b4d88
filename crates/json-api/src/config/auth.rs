//! Auth Config

use clap::Args;
use jiff::SignedDuration;

/// Credential backend and session token settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// `OpenBao` server address
    #[arg(long, env = "OPENBAO_ADDR")]
    pub openbao_addr: String,

    /// `OpenBao` authentication token
    #[arg(long, env = "OPENBAO_TOKEN", hide_env_values = true)]
    pub openbao_token: String,

    /// `OpenBao` Transit key name
    #[arg(long, env = "OPENBAO_TRANSIT_KEY")]
    pub openbao_transit_key: String,

    /// Lifetime of login tokens in days
    #[arg(long, env = "TOKEN_TTL_DAYS", default_value_t = 15_u16)]
    pub token_ttl_days: u16,
}

impl AuthConfig {
    #[must_use]
    pub fn token_ttl(&self) -> SignedDuration {
        SignedDuration::from_hours(i64::from(self.token_ttl_days) * 24)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_ttl_is_whole_days() {
        let config = AuthConfig {
            openbao_addr: "http://localhost:8200".to_string(),
            openbao_token: "root".to_string(),
            openbao_transit_key: "storefront".to_string(),
            token_ttl_days: 15,
        };

        assert_eq!(config.token_ttl(), SignedDuration::from_hours(360));
    }
}
