//! Current User Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    envelope::{Envelope, success},
    extensions::*,
    products::get::ProductResponse,
    state::State,
    users::{UserResponse, errors::into_status_error},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProfileResponse {
    pub user: UserResponse,

    /// Every product the user listed, deleted ones included
    pub products: Vec<ProductResponse>,
}

/// Current User Handler
///
/// Returns the signed-in user and their listings.
#[endpoint(
    tags("users"),
    summary = "Current User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Profile"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Envelope<ProfileResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let profile = state
        .app
        .users
        .get_user(user)
        .await
        .map_err(into_status_error)?;

    let products = state
        .app
        .products
        .list_user_products(user)
        .await
        .or_500("failed to fetch user products")?;

    Ok(success(ProfileResponse {
        user: profile.into(),
        products: products.into_iter().map(Into::into).collect(),
    }))
}
