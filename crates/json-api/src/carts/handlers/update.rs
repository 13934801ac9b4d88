//! Update Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::data::CartItemUpdate;

use crate::{
    carts::{CartItemResponse, errors::into_status_error},
    envelope::{Envelope, success},
    extensions::*,
    state::State,
};

/// Update Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateCartRequest {
    pub product_id: Uuid,

    /// New quantity; zero removes the product from the cart
    pub new_qty: u32,
}

impl From<UpdateCartRequest> for CartItemUpdate {
    fn from(request: UpdateCartRequest) -> Self {
        CartItemUpdate {
            product_uuid: request.product_id.into(),
            quantity: request.new_qty,
        }
    }
}

/// Update Cart Handler
#[endpoint(
    tags("carts"),
    summary = "Change Quantity In Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Line item updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Not enough stock or invalid transition"),
        (status_code = StatusCode::NOT_FOUND, description = "No active cart, or product not in it"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.update_cart",
    skip(json, depot),
    fields(
        user_uuid = tracing::field::Empty,
        product_uuid = tracing::field::Empty,
        quantity = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateCartRequest>,
    depot: &mut Depot,
) -> Result<Json<Envelope<CartItemResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("product_uuid", tracing::field::display(request.product_id));
    span.record("quantity", request.new_qty);

    let item = state
        .app
        .carts
        .update_item(user, request.into())
        .await
        .map_err(into_status_error)?;

    Ok(success(item.into()))
}
