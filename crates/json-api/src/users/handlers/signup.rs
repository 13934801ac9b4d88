//! Signup Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::{
    auth::credentials::Password,
    domain::users::{data::NewUser, records::UserUuid},
};

use crate::{
    envelope::{Envelope, success},
    extensions::*,
    state::State,
    users::{UserResponse, errors::into_status_error},
};

/// Signup Request
#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl From<SignupRequest> for NewUser {
    fn from(request: SignupRequest) -> Self {
        NewUser {
            uuid: UserUuid::new(),
            username: request.username,
            email: request.email,
            password: Password::new(request.password),
        }
    }
}

/// Signup Handler
///
/// Registers a new account.
#[endpoint(
    tags("users"),
    summary = "Sign Up",
    responses(
        (status_code = StatusCode::CREATED, description = "Account created"),
        (status_code = StatusCode::CONFLICT, description = "Email is already registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "users.signup",
    skip(json, depot, res),
    fields(user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<SignupRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<Envelope<UserResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let user = state
        .app
        .users
        .create_user(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    tracing::Span::current().record("user_uuid", tracing::field::display(user.uuid));

    res.status_code(StatusCode::CREATED);

    Ok(success(user.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::{users::UsersServiceError, validation::ValidationError};

    use crate::test_helpers::{MockServices, anonymous_service, make_user};

    use super::*;

    fn make_service(mocks: MockServices) -> Service {
        anonymous_service(mocks, Router::with_path("users").post(handler))
    }

    fn payload() -> serde_json::Value {
        json!({
            "username": "testbuyer",
            "email": "buyer@example.com",
            "password": "password123",
        })
    }

    #[tokio::test]
    async fn signup_returns_201_without_password() -> TestResult {
        let mut mocks = MockServices::default();

        mocks
            .users
            .expect_create_user()
            .once()
            .withf(|new| {
                new.username == "testbuyer"
                    && new.email == "buyer@example.com"
                    && new.password == Password::new("password123")
            })
            .return_once(|new| Ok(make_user(new.uuid)));

        let mut res = TestClient::post("http://example.com/users")
            .json(&payload())
            .send(&make_service(mocks))
            .await;

        let body: serde_json::Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body["data"]["email"], "buyer@example.com");
        assert!(body["data"].get("password").is_none());
        assert!(body["data"].get("passwordVerifier").is_none());

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_email_returns_409() -> TestResult {
        let mut mocks = MockServices::default();

        mocks
            .users
            .expect_create_user()
            .once()
            .return_once(|_| Err(UsersServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/users")
            .json(&payload())
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn short_password_returns_400() -> TestResult {
        let mut mocks = MockServices::default();

        mocks
            .users
            .expect_create_user()
            .once()
            .return_once(|_| {
                Err(UsersServiceError::Validation(ValidationError::TooShort {
                    field: "password",
                    min: 8,
                }))
            });

        let res = TestClient::post("http://example.com/users")
            .json(&json!({
                "username": "testbuyer",
                "email": "buyer@example.com",
                "password": "short",
            }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
