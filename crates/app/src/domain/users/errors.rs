//! Users service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::{auth::credentials::CredentialError, domain::validation::ValidationError};

#[derive(Debug, Error)]
pub enum UsersServiceError {
    #[error("user already exists")]
    AlreadyExists,

    #[error("user not found")]
    NotFound,

    #[error("not the account owner")]
    Forbidden,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("credential service error")]
    Credential(#[from] CredentialError),
}

impl From<Error> for UsersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
