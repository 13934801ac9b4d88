//! User Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::{auth::AuthServiceError, domain::users::UsersServiceError};

pub(crate) fn into_status_error(error: UsersServiceError) -> StatusError {
    match error {
        UsersServiceError::AlreadyExists => {
            StatusError::conflict().brief("Email is already registered")
        }
        UsersServiceError::NotFound => StatusError::not_found().brief("User not found"),
        UsersServiceError::Forbidden => {
            StatusError::forbidden().brief("Only the account owner may do this")
        }
        UsersServiceError::InvalidReference
        | UsersServiceError::MissingRequiredData
        | UsersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid user payload")
        }
        UsersServiceError::Validation(source) => {
            StatusError::bad_request().brief(source.to_string())
        }
        UsersServiceError::Sql(source) => {
            error!("user storage error: {source}");

            StatusError::internal_server_error()
        }
        UsersServiceError::Credential(source) => {
            error!("credential service error: {source}");

            StatusError::internal_server_error()
        }
    }
}

/// Login failures never reveal whether the email exists.
pub(crate) fn login_into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::InvalidCredentials | AuthServiceError::NotFound => {
            StatusError::bad_request().brief("Invalid email or password")
        }
        error => {
            error!("failed to log in: {error}");

            StatusError::internal_server_error()
        }
    }
}
