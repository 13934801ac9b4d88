//! Categories service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::validation::ValidationError;

#[derive(Debug, Error)]
pub enum CategoriesServiceError {
    #[error("category already exists")]
    AlreadyExists,

    #[error("category not found")]
    NotFound,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CategoriesServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::ForeignKeyViolation | ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
