//! Cart Records

use jiff::Timestamp;

use crate::{
    domain::{
        carts::lifecycle::{LineItemState, LineItemStatus},
        products::records::ProductUuid,
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "cart_status", rename_all = "lowercase")]
pub enum CartStatus {
    Active,
    Purchased,
}

/// Cart Record
#[derive(Debug, Clone, PartialEq)]
pub struct CartRecord {
    pub uuid: CartUuid,
    pub user_uuid: UserUuid,
    pub status: CartStatus,
    pub items: Vec<CartItemRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// Cart Item Record
#[derive(Debug, Clone, PartialEq)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub cart_uuid: CartUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub status: LineItemStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartItemRecord {
    #[must_use]
    pub fn state(&self) -> LineItemState {
        LineItemState {
            status: self.status,
            quantity: self.quantity,
        }
    }
}
