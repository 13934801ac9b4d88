//! Get Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{CartResponse, errors::into_status_error},
    envelope::{Envelope, success},
    extensions::*,
    state::State,
};

/// Get Cart Handler
///
/// Returns the caller's active cart with its line items.
#[endpoint(
    tags("carts"),
    summary = "Get Active Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Active cart"),
        (status_code = StatusCode::NOT_FOUND, description = "No active cart"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Envelope<CartResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let cart = state
        .app
        .carts
        .get_active_cart(user)
        .await
        .map_err(into_status_error)?;

    Ok(success(cart.into()))
}
