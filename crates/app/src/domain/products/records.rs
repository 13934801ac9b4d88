//! Product Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::{categories::records::CategoryUuid, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "product_status", rename_all = "lowercase")]
pub enum ProductStatus {
    Active,
    Deleted,
}

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub user_uuid: UserUuid,
    pub category_uuid: CategoryUuid,
    pub title: String,
    pub description: String,
    pub price: Decimal,

    /// Quantity on hand.
    pub quantity: u32,
    pub status: ProductStatus,
    pub images: Vec<ProductImageRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Product Image UUID
pub type ProductImageUuid = TypedUuid<ProductImageRecord>;

/// Product Image Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductImageRecord {
    pub uuid: ProductImageUuid,
    pub product_uuid: ProductUuid,
    pub image_url: String,
    pub created_at: Timestamp,
}
