//! Cart Handlers

pub(crate) mod add;
pub(crate) mod get;
pub(crate) mod purchase;
pub(crate) mod remove;
pub(crate) mod update;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::records::{CartItemRecord, CartRecord, CartStatus};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartResponse {
    /// The unique identifier of the cart
    pub uuid: Uuid,

    /// `active` or `purchased`
    pub status: String,

    /// Every line item, including removed and purchased ones
    pub items: Vec<CartItemResponse>,

    pub created_at: String,

    pub updated_at: String,
}

impl From<CartRecord> for CartResponse {
    fn from(cart: CartRecord) -> Self {
        Self {
            uuid: cart.uuid.into(),
            status: match cart.status {
                CartStatus::Active => "active",
                CartStatus::Purchased => "purchased",
            }
            .to_string(),
            items: cart.items.into_iter().map(Into::into).collect(),
            created_at: cart.created_at.to_string(),
            updated_at: cart.updated_at.to_string(),
        }
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartItemResponse {
    /// The unique identifier of the line item
    pub uuid: Uuid,

    pub product_uuid: Uuid,

    pub quantity: u32,

    /// `active`, `removed` or `purchased`
    pub status: String,

    pub created_at: String,

    pub updated_at: String,
}

impl From<CartItemRecord> for CartItemResponse {
    fn from(item: CartItemRecord) -> Self {
        Self {
            uuid: item.uuid.into(),
            product_uuid: item.product_uuid.into(),
            quantity: item.quantity,
            status: item.status.to_string(),
            created_at: item.created_at.to_string(),
            updated_at: item.updated_at.to_string(),
        }
    }
}
