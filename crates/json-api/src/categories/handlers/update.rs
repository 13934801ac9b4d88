//! Update Category Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use storefront_app::domain::categories::data::CategoryUpdate;

use crate::{
    categories::{CategoryRequest, CategoryResponse, errors::into_status_error},
    envelope::{Envelope, success},
    extensions::*,
    state::State,
};

/// Rename Category Handler
#[endpoint(
    tags("categories"),
    summary = "Update Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Category updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    category: PathParam<Uuid>,
    json: JsonBody<CategoryRequest>,
    depot: &mut Depot,
) -> Result<Json<Envelope<CategoryResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let category = state
        .app
        .categories
        .update_category(
            category.into_inner().into(),
            CategoryUpdate {
                name: json.into_inner().name,
            },
        )
        .await
        .map_err(into_status_error)?;

    Ok(success(category.into()))
}
