//! Remove Product From Cart Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    carts::errors::into_status_error,
    envelope::{Envelope, success},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RemovedItemResponse {
    pub product_uuid: Uuid,
}

/// Remove Product Handler
///
/// Marks the product's line item removed. Removing twice is the same as once.
#[endpoint(
    tags("carts"),
    summary = "Remove Product From Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Line item removed"),
        (status_code = StatusCode::NOT_FOUND, description = "No active cart, or product not in it"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Envelope<RemovedItemResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let product = product.into_inner();

    state
        .app
        .carts
        .remove_item(user, product.into())
        .await
        .map_err(into_status_error)?;

    Ok(success(RemovedItemResponse {
        product_uuid: product,
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::{carts::CartsServiceError, products::records::ProductUuid};

    use crate::test_helpers::{MockServices, TEST_USER_UUID, authenticated_service};

    use super::*;

    fn make_service(mocks: MockServices) -> Service {
        authenticated_service(mocks, Router::with_path("carts/{product}").delete(handler))
    }

    #[tokio::test]
    async fn remove_product_returns_200() -> TestResult {
        let product = ProductUuid::new();

        let mut mocks = MockServices::default();

        mocks
            .carts
            .expect_remove_item()
            .once()
            .withf(move |user, p| *user == TEST_USER_UUID && *p == product)
            .return_once(|_, _| Ok(()));

        let mut res = TestClient::delete(format!("http://example.com/carts/{product}"))
            .send(&make_service(mocks))
            .await;

        let body: Envelope<RemovedItemResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.data.product_uuid, product.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn remove_without_active_cart_returns_404() -> TestResult {
        let product = ProductUuid::new();

        let mut mocks = MockServices::default();

        mocks
            .carts
            .expect_remove_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/carts/{product}"))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
