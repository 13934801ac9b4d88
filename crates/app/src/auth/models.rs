//! Auth data models.

use jiff::Timestamp;
use uuid::Uuid;

use crate::{auth::ApiTokenVersion, domain::users::records::{UserRecord, UserUuid}};

/// Token data needed to verify a bearer token.
#[derive(Debug, Clone)]
pub(crate) struct ActiveApiToken {
    pub user_uuid: UserUuid,
    pub version: ApiTokenVersion,

    /// HMAC verifier for the token secret material.
    pub token_hash: String,
}

/// API token metadata persisted in storage.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiTokenMetadata {
    pub uuid: Uuid,
    pub user_uuid: UserUuid,
    pub version: ApiTokenVersion,
    pub created_at: Timestamp,
    pub last_used_at: Option<Timestamp>,
    pub expires_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
}

#[derive(Debug, Clone)]
pub(crate) struct NewApiToken {
    pub uuid: Uuid,
    pub user_uuid: UserUuid,
    pub version: ApiTokenVersion,
    pub token_hash: String,
    pub expires_at: Timestamp,
}

/// Token issuance result carrying the one-time raw token.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedApiToken {
    pub token: String,
    pub metadata: ApiTokenMetadata,
}

/// A successful login.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: UserRecord,
    pub token: IssuedApiToken,
}
