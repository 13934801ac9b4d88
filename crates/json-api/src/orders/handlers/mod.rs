//! Order Handlers

pub(crate) mod get;
pub(crate) mod index;

use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::records::{OrderDetails, OrderRecord};

use crate::carts::CartResponse;

/// Order Summary
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderSummaryResponse {
    pub uuid: Uuid,

    /// The purchased cart
    pub cart_uuid: Uuid,

    /// Sum of price times quantity over the purchased items
    #[salvo(schema(value_type = String))]
    pub total_price: Decimal,

    pub created_at: String,
}

impl From<OrderRecord> for OrderSummaryResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            uuid: order.uuid.into(),
            cart_uuid: order.cart_uuid.into(),
            total_price: order.total_price,
            created_at: order.created_at.to_string(),
        }
    }
}

/// Order with the purchased cart and its line items.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub order: OrderSummaryResponse,
    pub cart: CartResponse,
}

impl From<OrderDetails> for OrderResponse {
    fn from(details: OrderDetails) -> Self {
        Self {
            order: details.order.into(),
            cart: details.cart.into(),
        }
    }
}
