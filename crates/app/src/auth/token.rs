//! Session token format: `sf_v1_<token uuid>.<secret hex>`.

use std::{fmt, str::FromStr};

use rand::{RngCore, rngs::OsRng};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

use crate::domain::users::records::UserUuid;

/// Session token prefix.
pub const API_TOKEN_PREFIX: &str = "sf";

/// Number of secret bytes encoded in a token.
pub const API_TOKEN_SECRET_BYTES: usize = 32;

const API_TOKEN_SECRET_HEX_CHARS: usize = API_TOKEN_SECRET_BYTES * 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiTokenVersion {
    V1,
}

impl ApiTokenVersion {
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::V1 => 1,
        }
    }

    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl TryFrom<i16> for ApiTokenVersion {
    type Error = ApiTokenError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::V1),
            _ => Err(ApiTokenError::UnsupportedVersion),
        }
    }
}

impl FromStr for ApiTokenVersion {
    type Err = ApiTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "v1" => Ok(Self::V1),
            _ => Err(ApiTokenError::UnsupportedVersion),
        }
    }
}

#[derive(Clone)]
pub struct ApiTokenSecret([u8; API_TOKEN_SECRET_BYTES]);

impl ApiTokenSecret {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; API_TOKEN_SECRET_BYTES]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0_u8; API_TOKEN_SECRET_BYTES];

        OsRng.fill_bytes(&mut bytes);

        Self(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; API_TOKEN_SECRET_BYTES] {
        &self.0
    }

    fn to_hex(&self) -> String {
        self.0
            .iter()
            .flat_map(|byte| [byte >> 4, byte & 0x0f])
            .filter_map(|nibble| char::from_digit(u32::from(nibble), 16))
            .collect()
    }

    fn from_hex(encoded: &str) -> Option<Self> {
        if encoded.len() != API_TOKEN_SECRET_HEX_CHARS || !encoded.is_ascii() {
            return None;
        }

        let mut bytes = [0_u8; API_TOKEN_SECRET_BYTES];

        for (byte, pair) in bytes.iter_mut().zip(encoded.as_bytes().chunks_exact(2)) {
            let pair = std::str::from_utf8(pair).ok()?;

            *byte = u8::from_str_radix(pair, 16).ok()?;
        }

        Some(Self(bytes))
    }
}

impl fmt::Debug for ApiTokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiTokenSecret(**redacted**)")
    }
}

impl Drop for ApiTokenSecret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

#[derive(Debug, Clone)]
pub struct ParsedApiToken {
    pub token_uuid: Uuid,
    pub version: ApiTokenVersion,
    pub secret: ApiTokenSecret,
}

#[derive(Debug, Error)]
pub enum ApiTokenError {
    #[error("api token format is invalid")]
    InvalidFormat,

    #[error("api token uses an unsupported version")]
    UnsupportedVersion,

    #[error("api token secret encoding is invalid")]
    InvalidSecretEncoding,
}

#[must_use]
pub fn format_api_token(
    token_uuid: Uuid,
    version: ApiTokenVersion,
    secret: &ApiTokenSecret,
) -> String {
    format!(
        "{API_TOKEN_PREFIX}_{}_{}.{}",
        version.segment(),
        token_uuid.simple(),
        secret.to_hex()
    )
}

pub fn parse_api_token(token: &str) -> Result<ParsedApiToken, ApiTokenError> {
    let (identity, secret_hex) = token.split_once('.').ok_or(ApiTokenError::InvalidFormat)?;

    let rest = identity
        .strip_prefix(API_TOKEN_PREFIX)
        .and_then(|rest| rest.strip_prefix('_'))
        .ok_or(ApiTokenError::InvalidFormat)?;

    let (version_segment, uuid_segment) =
        rest.split_once('_').ok_or(ApiTokenError::InvalidFormat)?;

    let version = version_segment.parse::<ApiTokenVersion>()?;

    let token_uuid = Uuid::try_parse(uuid_segment).map_err(|_| ApiTokenError::InvalidFormat)?;

    let secret = ApiTokenSecret::from_hex(secret_hex).ok_or(ApiTokenError::InvalidSecretEncoding)?;

    Ok(ParsedApiToken {
        token_uuid,
        version,
        secret,
    })
}

/// Build the HMAC input bytes for a session token.
///
/// Format: `{token_uuid_hex}:{version}:{user_uuid_hex}:{secret_hex}`
#[must_use]
pub fn build_verifier_input(
    token_uuid: Uuid,
    version: ApiTokenVersion,
    user_uuid: UserUuid,
    secret: &ApiTokenSecret,
) -> Vec<u8> {
    format!(
        "{}:{}:{}:{}",
        token_uuid.simple(),
        version.as_i16(),
        user_uuid.into_uuid().simple(),
        secret.to_hex(),
    )
    .into_bytes()
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn formatted_tokens_parse_back() -> TestResult {
        let token_uuid = Uuid::now_v7();
        let secret = ApiTokenSecret::from_bytes([0xAB; API_TOKEN_SECRET_BYTES]);
        let token = format_api_token(token_uuid, ApiTokenVersion::V1, &secret);

        assert!(token.starts_with("sf_v1_"));

        let parsed = parse_api_token(&token)?;

        assert_eq!(parsed.token_uuid, token_uuid);
        assert_eq!(parsed.version, ApiTokenVersion::V1);
        assert_eq!(parsed.secret.as_bytes(), secret.as_bytes());

        Ok(())
    }

    #[test]
    fn secret_is_sixty_four_lowercase_hex_chars() {
        let secret = ApiTokenSecret::from_bytes([0x0F; API_TOKEN_SECRET_BYTES]);
        let token = format_api_token(Uuid::nil(), ApiTokenVersion::V1, &secret);

        let (_, hex) = token.split_once('.').unwrap_or_default();

        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
    }

    #[test]
    fn parse_rejects_foreign_prefix() {
        let secret = "ab".repeat(API_TOKEN_SECRET_BYTES);

        assert!(matches!(
            parse_api_token(&format!("lt_v1_{}.{secret}", Uuid::nil().simple())),
            Err(ApiTokenError::InvalidFormat)
        ));
    }

    #[test]
    fn parse_rejects_unknown_version() {
        let secret = "ab".repeat(API_TOKEN_SECRET_BYTES);

        assert!(matches!(
            parse_api_token(&format!("sf_v9_{}.{secret}", Uuid::nil().simple())),
            Err(ApiTokenError::UnsupportedVersion)
        ));
    }

    #[test]
    fn parse_rejects_short_or_non_hex_secrets() {
        let uuid = Uuid::nil().simple();

        assert!(matches!(
            parse_api_token(&format!("sf_v1_{uuid}.abcd")),
            Err(ApiTokenError::InvalidSecretEncoding)
        ));
        assert!(matches!(
            parse_api_token(&format!("sf_v1_{uuid}.{}", "zz".repeat(API_TOKEN_SECRET_BYTES))),
            Err(ApiTokenError::InvalidSecretEncoding)
        ));
    }

    #[test]
    fn verifier_input_binds_the_user() {
        let token_uuid = Uuid::nil();
        let secret = ApiTokenSecret::from_bytes([0xCD; API_TOKEN_SECRET_BYTES]);

        let first = build_verifier_input(
            token_uuid,
            ApiTokenVersion::V1,
            UserUuid::from_uuid(Uuid::nil()),
            &secret,
        );
        let second = build_verifier_input(
            token_uuid,
            ApiTokenVersion::V1,
            UserUuid::from_uuid(Uuid::max()),
            &secret,
        );

        assert_ne!(first, second);
    }
}
