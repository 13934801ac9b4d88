//! Category Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    categories::{CategoryResponse, errors::into_status_error},
    envelope::{Envelope, success},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoriesResponse {
    pub categories: Vec<CategoryResponse>,
}

/// Category Index Handler
///
/// Returns every active category ordered by name.
#[endpoint(tags("categories"), summary = "List Categories")]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Envelope<CategoriesResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let categories = state
        .app
        .categories
        .list_categories()
        .await
        .map_err(into_status_error)?;

    Ok(success(CategoriesResponse {
        categories: categories.into_iter().map(Into::into).collect(),
    }))
}
