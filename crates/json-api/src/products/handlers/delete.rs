//! Delete Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Delete Product Handler
///
/// Soft deletes a product the caller listed.
#[endpoint(
    tags("products"),
    summary = "Delete Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Product deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Not the product owner"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    state
        .app
        .products
        .delete_product(user, product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
