//! Delete User Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State, users::errors::into_status_error};

/// Delete User Handler
///
/// Soft deletes the caller's account and revokes its tokens.
#[endpoint(
    tags("users"),
    summary = "Delete User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "User deleted"),
        (status_code = StatusCode::FORBIDDEN, description = "Not the account owner"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.user_uuid_or_401()?;

    state
        .app
        .users
        .delete_user(session, user.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
