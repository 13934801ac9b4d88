//! Inventory errors.

use thiserror::Error;

use crate::domain::products::records::ProductUuid;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("product {0} not found")]
    NotFound(ProductUuid),

    #[error("available only {available} items of product {product}, requested {requested}")]
    InsufficientStock {
        product: ProductUuid,
        requested: u32,
        available: u32,
    },

    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}
