//! Add Product Images Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::products::data::ImageUrls;

use crate::{
    envelope::{Envelope, success},
    extensions::*,
    products::{errors::into_status_error, get::ProductImageResponse},
    state::State,
};

/// Add Images Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddImagesRequest {
    #[salvo(schema(value_type = Vec<String>))]
    pub image_urls: ImageUrls,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ImagesResponse {
    /// The newly recorded images
    pub images: Vec<ProductImageResponse>,
}

/// Add Product Images Handler
#[endpoint(
    tags("products"),
    summary = "Add Product Images",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Images added"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Not the product owner"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.images.create",
    skip(product, json, depot, res),
    fields(
        user_uuid = tracing::field::Empty,
        product_uuid = tracing::field::Empty,
        images_count = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<AddImagesRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<Envelope<ImagesResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let product = product.into_inner();
    let image_urls = json.into_inner().image_urls;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("product_uuid", tracing::field::display(product));
    span.record("images_count", image_urls.len());

    let images = state
        .app
        .products
        .add_images(user, product.into(), image_urls)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(success(ImagesResponse {
        images: images.into_iter().map(Into::into).collect(),
    }))
}
