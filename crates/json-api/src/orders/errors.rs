//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
