//! Create Category Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use storefront_app::domain::categories::{data::NewCategory, records::CategoryUuid};

use crate::{
    categories::{CategoryRequest, CategoryResponse, errors::into_status_error},
    envelope::{Envelope, success},
    extensions::*,
    state::State,
};

/// Create Category Handler
#[endpoint(
    tags("categories"),
    summary = "Create Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Category created"),
        (status_code = StatusCode::CONFLICT, description = "Category already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CategoryRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<Envelope<CategoryResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let category = state
        .app
        .categories
        .create_category(NewCategory {
            uuid: CategoryUuid::new(),
            name: json.into_inner().name,
        })
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(success(category.into()))
}
