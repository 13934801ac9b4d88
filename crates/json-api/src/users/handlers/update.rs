//! Update User Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::users::data::UserUpdate;

use crate::{
    envelope::{Envelope, success},
    extensions::*,
    state::State,
    users::{UserResponse, errors::into_status_error},
};

/// Update User Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateUserRequest {
    pub username: String,
    pub email: String,
}

impl From<UpdateUserRequest> for UserUpdate {
    fn from(request: UpdateUserRequest) -> Self {
        UserUpdate {
            username: request.username,
            email: request.email,
        }
    }
}

/// Update User Handler
#[endpoint(
    tags("users"),
    summary = "Update User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "User updated"),
        (status_code = StatusCode::FORBIDDEN, description = "Not the account owner"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "users.update",
    skip(user, json, depot),
    fields(session_uuid = tracing::field::Empty, user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    json: JsonBody<UpdateUserRequest>,
    depot: &mut Depot,
) -> Result<Json<Envelope<UserResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.user_uuid_or_401()?;
    let user = user.into_inner();

    let span = tracing::Span::current();

    span.record("session_uuid", tracing::field::display(session));
    span.record("user_uuid", tracing::field::display(user));

    let updated = state
        .app
        .users
        .update_user(session, user.into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(success(updated.into()))
}
