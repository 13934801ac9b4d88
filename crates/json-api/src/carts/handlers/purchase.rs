//! Purchase Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use storefront_app::domain::{carts::CartsServiceError, orders::records::OrderRecord};

use crate::{
    carts::errors::into_status_error,
    envelope::{Envelope, success},
    extensions::*,
    observability::observe_purchase,
    orders::OrderSummaryResponse,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PurchaseResponse {
    pub order: OrderSummaryResponse,
}

fn purchase_outcome(result: &Result<OrderRecord, CartsServiceError>) -> &'static str {
    match result {
        Ok(_) => "completed",
        Err(CartsServiceError::InsufficientStock { .. }) => "insufficient_stock",
        Err(CartsServiceError::NotFound) => "no_active_cart",
        Err(_) => "failed",
    }
}

/// Purchase Handler
///
/// Closes the caller's active cart and opens an order for its active items.
#[endpoint(
    tags("carts"),
    summary = "Purchase Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Not enough stock"),
        (status_code = StatusCode::NOT_FOUND, description = "No active cart, or a product is gone"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.purchase",
    skip(depot, res),
    fields(user_uuid = tracing::field::Empty, order_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<Envelope<PurchaseResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));

    let result = state.app.carts.purchase(user).await;

    observe_purchase(purchase_outcome(&result));

    let order = result.map_err(into_status_error)?;

    span.record("order_uuid", tracing::field::display(order.uuid));

    res.status_code(StatusCode::CREATED);

    Ok(success(PurchaseResponse {
        order: order.into(),
    }))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::{
        carts::records::CartUuid, orders::records::OrderUuid, products::records::ProductUuid,
    };

    use crate::test_helpers::{MockServices, TEST_USER_UUID, authenticated_service, make_order};

    use super::*;

    fn make_service(mocks: MockServices) -> Service {
        authenticated_service(mocks, Router::with_path("carts/purchase").post(handler))
    }

    #[test]
    fn outcomes_label_stock_and_cart_failures() {
        let order = make_order(OrderUuid::new(), CartUuid::new(), Decimal::ONE);
        let short = CartsServiceError::InsufficientStock {
            product: ProductUuid::new(),
            requested: 3,
            available: 1,
        };

        assert_eq!(purchase_outcome(&Ok(order)), "completed");
        assert_eq!(purchase_outcome(&Err(short)), "insufficient_stock");
        assert_eq!(
            purchase_outcome(&Err(CartsServiceError::NotFound)),
            "no_active_cart"
        );
        assert_eq!(
            purchase_outcome(&Err(CartsServiceError::AlreadyInCart)),
            "failed"
        );
    }

    #[tokio::test]
    async fn purchase_returns_201_with_order() -> TestResult {
        let order_uuid = OrderUuid::new();
        let cart_uuid = CartUuid::new();

        let mut mocks = MockServices::default();

        mocks
            .carts
            .expect_purchase()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(move |_| Ok(make_order(order_uuid, cart_uuid, Decimal::new(5000, 2))));

        let mut res = TestClient::post("http://example.com/carts/purchase")
            .send(&make_service(mocks))
            .await;

        let body: serde_json::Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body["status"], "success");
        assert_eq!(body["data"]["order"]["uuid"], order_uuid.to_string());
        assert_eq!(body["data"]["order"]["cartUuid"], cart_uuid.to_string());
        assert_eq!(body["data"]["order"]["totalPrice"], "50.00");

        Ok(())
    }

    #[tokio::test]
    async fn purchase_without_active_cart_returns_404() -> TestResult {
        let mut mocks = MockServices::default();

        mocks
            .carts
            .expect_purchase()
            .once()
            .return_once(|_| Err(CartsServiceError::NotFound));

        let res = TestClient::post("http://example.com/carts/purchase")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn purchase_with_insufficient_stock_returns_400() -> TestResult {
        let product = ProductUuid::new();

        let mut mocks = MockServices::default();

        mocks
            .carts
            .expect_purchase()
            .once()
            .return_once(move |_| {
                Err(CartsServiceError::InsufficientStock {
                    product,
                    requested: 2,
                    available: 1,
                })
            });

        let res = TestClient::post("http://example.com/carts/purchase")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
