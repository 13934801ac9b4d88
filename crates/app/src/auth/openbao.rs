//! OpenBao Transit client for HMAC operations.

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use reqwest::Client;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::auth::credentials::{CredentialError, CredentialService};

/// Configuration for connecting to an OpenBao instance.
#[derive(Debug, Clone)]
pub struct OpenBaoConfig {
    /// OpenBao server address, e.g. `"http://localhost:8200"`.
    pub addr: String,

    /// OpenBao authentication token.
    pub token: String,

    /// Transit key name to use for HMAC operations.
    pub transit_key: String,
}

/// HTTP client for OpenBao Transit HMAC operations.
#[derive(Debug, Clone)]
pub struct OpenBaoClient {
    config: OpenBaoConfig,
    http: Client,
}

impl OpenBaoClient {
    #[must_use]
    pub fn new(config: OpenBaoConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn transit_url(&self, operation: &str) -> String {
        format!(
            "{}/v1/transit/{operation}/{}",
            self.config.addr.trim_end_matches('/'),
            self.config.transit_key
        )
    }

    async fn post_transit<B, R>(&self, operation: &str, body: &B) -> Result<R, OpenBaoError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let response = self
            .http
            .post(self.transit_url(operation))
            .header("X-Vault-Token", &self.config.token)
            .json(body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();

            return Err(OpenBaoError::UnexpectedResponse(format!(
                "{operation} request failed with status {status}: {text}"
            )));
        }

        let parsed: TransitResponse<R> = response.json().await?;

        Ok(parsed.data)
    }
}

#[async_trait]
impl CredentialService for OpenBaoClient {
    async fn hmac(&self, input: &[u8]) -> Result<String, CredentialError> {
        let body = HmacRequest {
            input: BASE64.encode(input),
        };

        let data: HmacData = self.post_transit("hmac", &body).await?;

        Ok(data.hmac)
    }

    async fn verify(&self, input: &[u8], verifier: &str) -> Result<bool, CredentialError> {
        let body = VerifyRequest {
            input: BASE64.encode(input),
            hmac: verifier,
        };

        let data: VerifyData = self.post_transit("verify", &body).await?;

        Ok(data.valid)
    }
}

#[derive(Debug, Serialize)]
struct HmacRequest {
    input: String,
}

#[derive(Debug, Serialize)]
struct VerifyRequest<'a> {
    input: String,
    hmac: &'a str,
}

#[derive(Debug, Deserialize)]
struct TransitResponse<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct HmacData {
    hmac: String,
}

#[derive(Debug, Deserialize)]
struct VerifyData {
    valid: bool,
}

/// Errors that can occur when communicating with OpenBao.
#[derive(Debug, Error)]
pub enum OpenBaoError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from OpenBao: {0}")]
    UnexpectedResponse(String),
}
