//! Carts Data

use crate::domain::products::records::ProductUuid;

/// Add-to-cart request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewCartItem {
    pub product_uuid: ProductUuid,
    pub quantity: u32,
}

/// Quantity change for a product already in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartItemUpdate {
    pub product_uuid: ProductUuid,
    pub quantity: u32,
}
