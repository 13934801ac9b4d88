//! Get Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    envelope::{Envelope, success},
    extensions::*,
    orders::{OrderResponse, errors::into_status_error},
    state::State,
};

/// Get Order Handler
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Envelope<OrderResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let details = state
        .app
        .orders
        .get_order(user, order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(success(details.into()))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::orders::{OrdersServiceError, records::OrderUuid};

    use crate::test_helpers::{
        MockServices, TEST_USER_UUID, authenticated_service, make_order_details,
    };

    use super::*;

    fn make_service(mocks: MockServices) -> Service {
        authenticated_service(mocks, Router::with_path("users/orders/{order}").get(handler))
    }

    #[tokio::test]
    async fn get_returns_order() -> TestResult {
        let order = OrderUuid::new();

        let mut mocks = MockServices::default();

        mocks
            .orders
            .expect_get_order()
            .once()
            .withf(move |user, o| *user == TEST_USER_UUID && *o == order)
            .return_once(move |_, o| Ok(make_order_details(o)));

        let mut res = TestClient::get(format!("http://example.com/users/orders/{order}"))
            .send(&make_service(mocks))
            .await;

        let body: Envelope<OrderResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.data.order.uuid, order.into_uuid());
        assert_eq!(body.data.order.total_price, Decimal::new(5000, 2));

        Ok(())
    }

    #[tokio::test]
    async fn someone_elses_order_returns_404() -> TestResult {
        let order = OrderUuid::new();

        let mut mocks = MockServices::default();

        mocks
            .orders
            .expect_get_order()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/users/orders/{order}"))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
