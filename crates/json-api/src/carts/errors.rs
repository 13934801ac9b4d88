//! Cart Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::NotFound => StatusError::not_found().brief("No active cart"),
        CartsServiceError::ItemNotFound => {
            StatusError::not_found().brief("Product is not in the cart")
        }
        CartsServiceError::ProductNotFound(_) => {
            StatusError::not_found().brief("Product not found")
        }
        CartsServiceError::AlreadyExists => StatusError::conflict().brief("Cart already exists"),
        error @ (CartsServiceError::AlreadyInCart
        | CartsServiceError::InsufficientStock { .. }
        | CartsServiceError::InvalidTransition(_)
        | CartsServiceError::Validation(_)) => StatusError::bad_request().brief(error.to_string()),
        CartsServiceError::InvalidReference
        | CartsServiceError::MissingRequiredData
        | CartsServiceError::InvalidData => StatusError::bad_request().brief("Invalid cart payload"),
        CartsServiceError::Sql(source) => {
            error!("cart storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
