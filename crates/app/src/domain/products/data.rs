//! Products Data

use rust_decimal::Decimal;
use smallvec::SmallVec;

use crate::domain::{
    categories::records::CategoryUuid,
    products::records::ProductUuid,
    validation::{ValidationError, require_non_empty, require_non_negative},
};

/// Image references submitted with a listing.
pub type ImageUrls = SmallVec<[String; 4]>;

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub category_uuid: CategoryUuid,
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: u32,
    pub image_urls: ImageUrls,
}

impl NewProduct {
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        validate_listing(&self.title, &self.description, self.price)?;
        validate_image_urls(&self.image_urls)
    }
}

/// Product Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: u32,
}

impl ProductUpdate {
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        validate_listing(&self.title, &self.description, self.price)
    }
}

fn validate_listing(title: &str, description: &str, price: Decimal) -> Result<(), ValidationError> {
    require_non_empty("title", title)?;
    require_non_empty("description", description)?;
    require_non_negative("price", price)
}

pub(crate) fn validate_image_urls(urls: &[String]) -> Result<(), ValidationError> {
    urls.iter()
        .try_for_each(|url| require_non_empty("image_url", url))
}
