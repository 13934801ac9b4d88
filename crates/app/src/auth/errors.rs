//! Auth service errors.

use sqlx::Error;
use thiserror::Error;

use crate::auth::{ApiTokenError, credentials::CredentialError};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// The bearer token is unknown, revoked, expired or belongs to an inactive user.
    #[error("token not found")]
    NotFound,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("token processing error")]
    Token(#[source] ApiTokenError),

    #[error("token expiry out of range")]
    Expiry(#[source] jiff::Error),

    #[error("credential service error")]
    Credential(#[from] CredentialError),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}

impl From<ApiTokenError> for AuthServiceError {
    fn from(error: ApiTokenError) -> Self {
        Self::Token(error)
    }
}
