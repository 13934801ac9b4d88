//! Bearer token middleware.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};
use storefront_app::auth::AuthServiceError;
use tracing::error;

use crate::{extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid Authorization header"));
        ctrl.skip_rest();

        return;
    };

    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => state,
        Err(_error) => {
            res.render(StatusError::internal_server_error());
            ctrl.skip_rest();

            return;
        }
    };

    let user_uuid = match state.app.auth.authenticate_bearer(token).await {
        Ok(user_uuid) => user_uuid,
        Err(AuthServiceError::NotFound | AuthServiceError::Token(_)) => {
            res.render(StatusError::unauthorized().brief("Invalid API token"));
            ctrl.skip_rest();

            return;
        }
        Err(source) => {
            error!("failed to authenticate api token: {source}");

            res.render(StatusError::internal_server_error());
            ctrl.skip_rest();

            return;
        }
    };

    depot.insert_user_uuid(user_uuid);

    ctrl.call_next(req, depot, res).await;
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        test::{ResponseExt, TestClient},
    };
    use storefront_app::{
        auth::{ApiTokenError, MockAuthService},
        domain::users::records::UserUuid,
    };
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::test_helpers::state_with_auth;

    use super::*;

    #[salvo::handler]
    async fn echo_user(depot: &mut Depot, res: &mut Response) {
        let user = depot.user_uuid_or_401().ok().map_or_else(
            || "missing".to_string(),
            |uuid: UserUuid| uuid.to_string(),
        );

        res.render(user);
    }

    fn make_service(auth: MockAuthService) -> Service {
        let state = state_with_auth(auth);

        let router = Router::new()
            .hoop(inject(state))
            .hoop(handler)
            .push(Router::new().get(echo_user));

        Service::new(router)
    }

    #[tokio::test]
    async fn missing_authorization_header_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer().never();

        let res = TestClient::get("http://example.com")
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn non_bearer_authorization_header_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer().never();

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Basic abc123", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_token_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .withf(|token| token == "abc123")
            .return_once(|_| Err(AuthServiceError::NotFound));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn malformed_token_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .return_once(|_| Err(AuthServiceError::Token(ApiTokenError::InvalidFormat)));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer not-a-token", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn valid_token_injects_user_uuid() -> TestResult {
        let user = UserUuid::from_uuid(Uuid::nil());

        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .withf(|token| token == "abc123")
            .return_once(move |_| Ok(user));

        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, user.to_string());

        Ok(())
    }
}
