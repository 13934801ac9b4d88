//! Update Product Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::products::data::ProductUpdate;

use crate::{
    envelope::{Envelope, success},
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Update Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProductRequest {
    pub title: String,

    pub description: String,

    #[salvo(schema(value_type = String))]
    pub price: Decimal,

    pub quantity: u32,
}

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(request: UpdateProductRequest) -> Self {
        ProductUpdate {
            title: request.title,
            description: request.description,
            price: request.price,
            quantity: request.quantity,
        }
    }
}

/// Product Update Handler
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Not the product owner"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.update",
    skip(product, json, depot),
    fields(
        user_uuid = tracing::field::Empty,
        product_uuid = tracing::field::Empty,
        price = tracing::field::Empty,
        quantity = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<Envelope<ProductResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let request = json.into_inner();
    let product = product.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("product_uuid", tracing::field::display(product));
    span.record("price", tracing::field::display(request.price));
    span.record("quantity", request.quantity);

    let updated = state
        .app
        .products
        .update_product(user, product.into(), request.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(product_uuid = %product, "updated product");

    Ok(success(updated.into()))
}
