//! Add Product To Cart Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::data::NewCartItem;

use crate::{
    carts::{CartItemResponse, errors::into_status_error},
    envelope::{Envelope, success},
    extensions::*,
    state::State,
};

/// Add To Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddProductRequest {
    pub product_id: Uuid,
    pub quantity: u32,
}

impl From<AddProductRequest> for NewCartItem {
    fn from(request: AddProductRequest) -> Self {
        NewCartItem {
            product_uuid: request.product_id.into(),
            quantity: request.quantity,
        }
    }
}

/// Add Product Handler
///
/// Adds a product to the caller's active cart, opening one when needed.
#[endpoint(
    tags("carts"),
    summary = "Add Product To Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Line item added"),
        (status_code = StatusCode::BAD_REQUEST, description = "Already in cart, not enough stock or invalid quantity"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.add_product",
    skip(json, depot, res),
    fields(
        user_uuid = tracing::field::Empty,
        product_uuid = tracing::field::Empty,
        quantity = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<AddProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<Envelope<CartItemResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("product_uuid", tracing::field::display(request.product_id));
    span.record("quantity", request.quantity);

    let item = state
        .app
        .carts
        .add_item(user, request.into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(success(item.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::{
        carts::{CartsServiceError, records::CartUuid},
        products::records::ProductUuid,
    };

    use crate::test_helpers::{MockServices, TEST_USER_UUID, authenticated_service, make_cart_item};

    use super::*;

    fn make_service(mocks: MockServices) -> Service {
        authenticated_service(mocks, Router::with_path("carts/add-product").post(handler))
    }

    #[tokio::test]
    async fn add_product_returns_201() -> TestResult {
        let product = ProductUuid::new();

        let mut mocks = MockServices::default();

        mocks
            .carts
            .expect_add_item()
            .once()
            .withf(move |user, item| {
                *user == TEST_USER_UUID
                    && *item
                        == NewCartItem {
                            product_uuid: product,
                            quantity: 2,
                        }
            })
            .return_once(move |_, item| {
                Ok(make_cart_item(CartUuid::new(), item.product_uuid, item.quantity))
            });

        let mut res = TestClient::post("http://example.com/carts/add-product")
            .json(&json!({ "productId": product.into_uuid(), "quantity": 2 }))
            .send(&make_service(mocks))
            .await;

        let body: Envelope<CartItemResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.data.product_uuid, product.into_uuid());
        assert_eq!(body.data.quantity, 2);

        Ok(())
    }

    #[tokio::test]
    async fn product_already_in_cart_returns_400() -> TestResult {
        let mut mocks = MockServices::default();

        mocks
            .carts
            .expect_add_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::AlreadyInCart));

        let res = TestClient::post("http://example.com/carts/add-product")
            .json(&json!({ "productId": Uuid::now_v7(), "quantity": 1 }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_product_returns_404() -> TestResult {
        let product = ProductUuid::new();

        let mut mocks = MockServices::default();

        mocks
            .carts
            .expect_add_item()
            .once()
            .return_once(move |_, _| Err(CartsServiceError::ProductNotFound(product)));

        let res = TestClient::post("http://example.com/carts/add-product")
            .json(&json!({ "productId": product.into_uuid(), "quantity": 1 }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn missing_quantity_returns_400() -> TestResult {
        let res = TestClient::post("http://example.com/carts/add-product")
            .json(&json!({ "productId": Uuid::now_v7() }))
            .send(&make_service(MockServices::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
