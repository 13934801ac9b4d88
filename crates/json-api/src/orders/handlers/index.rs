//! Order Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    envelope::{Envelope, success},
    extensions::*,
    orders::{OrderResponse, errors::into_status_error},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    pub orders: Vec<OrderResponse>,
}

/// Order Index Handler
///
/// Returns the caller's orders, newest first.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Envelope<OrdersResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let orders = state
        .app
        .orders
        .list_orders(user)
        .await
        .map_err(into_status_error)?;

    Ok(success(OrdersResponse {
        orders: orders.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::orders::records::OrderUuid;

    use crate::test_helpers::{
        MockServices, TEST_USER_UUID, authenticated_service, make_order_details,
    };

    use super::*;

    #[tokio::test]
    async fn index_lists_orders_with_their_carts() -> TestResult {
        let order = OrderUuid::new();

        let mut mocks = MockServices::default();

        mocks
            .orders
            .expect_list_orders()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(move |_| Ok(vec![make_order_details(order)]));

        let service = authenticated_service(mocks, Router::with_path("users/orders").get(handler));

        let mut res = TestClient::get("http://example.com/users/orders")
            .send(&service)
            .await;

        let body: Envelope<OrdersResponse> = res.take_json().await?;
        let first = body.data.orders.first().ok_or("missing order")?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(first.order.uuid, order.into_uuid());
        assert_eq!(first.cart.status, "purchased");
        assert_eq!(first.cart.items.len(), 1);

        Ok(())
    }
}
