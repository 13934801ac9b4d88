//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::auth::{Session, credentials::Password};

use crate::{
    envelope::{Envelope, success},
    extensions::*,
    state::State,
    users::{UserResponse, errors::login_into_status_error},
};

/// Login Request
#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Issued bearer token
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TokenResponse {
    /// Raw token; it is only ever returned here
    pub token: String,
    pub expires_at: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginResponse {
    pub user: UserResponse,
    pub token: TokenResponse,
}

impl From<Session> for LoginResponse {
    fn from(session: Session) -> Self {
        Self {
            user: session.user.into(),
            token: TokenResponse {
                token: session.token.token,
                expires_at: session
                    .token
                    .metadata
                    .expires_at
                    .map(|expires_at| expires_at.to_string()),
            },
        }
    }
}

/// Login Handler
///
/// Exchanges an email and password for a bearer token.
#[endpoint(
    tags("users"),
    summary = "Log In",
    responses(
        (status_code = StatusCode::OK, description = "Logged in"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid email or password"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<Envelope<LoginResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let session = state
        .app
        .auth
        .login(&request.email, Password::new(request.password))
        .await
        .map_err(login_into_status_error)?;

    tracing::info!(user_uuid = %session.user.uuid, "user logged in");

    Ok(success(session.into()))
}
