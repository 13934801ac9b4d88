//! Order Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::{
        carts::records::{CartRecord, CartUuid},
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Record
///
/// Written once, when its cart is purchased.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub cart_uuid: CartUuid,
    pub user_uuid: UserUuid,
    pub total_price: Decimal,
    pub created_at: Timestamp,
}

/// An order with the purchased cart and its line items.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetails {
    pub order: OrderRecord,
    pub cart: CartRecord,
}
