//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product already exists")
        }
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::Forbidden => {
            StatusError::forbidden().brief("Product belongs to another user")
        }
        ProductsServiceError::InvalidReference => {
            StatusError::bad_request().brief("Category does not exist")
        }
        ProductsServiceError::MissingRequiredData | ProductsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid product payload")
        }
        ProductsServiceError::Validation(source) => {
            StatusError::bad_request().brief(source.to_string())
        }
        ProductsServiceError::Sql(source) => {
            error!("product storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
