//! Product Images Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::domain::products::records::{
    ProductImageRecord, ProductImageUuid, ProductRecord, ProductUuid,
};

const LIST_PRODUCT_IMAGES_SQL: &str = include_str!("../sql/list_product_images.sql");
const CREATE_PRODUCT_IMAGE_SQL: &str = include_str!("../sql/create_product_image.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductImagesRepository;

impl PgProductImagesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_images(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        image_urls: &[String],
    ) -> Result<Vec<ProductImageRecord>, sqlx::Error> {
        let mut images = Vec::with_capacity(image_urls.len());

        for image_url in image_urls {
            let image = query_as::<Postgres, ProductImageRecord>(CREATE_PRODUCT_IMAGE_SQL)
                .bind(ProductImageUuid::new().into_uuid())
                .bind(product.into_uuid())
                .bind(image_url.trim())
                .fetch_one(&mut **tx)
                .await?;

            images.push(image);
        }

        Ok(images)
    }

    /// Load images for each product and attach them in place.
    pub(crate) async fn attach_images(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &mut [ProductRecord],
    ) -> Result<(), sqlx::Error> {
        if products.is_empty() {
            return Ok(());
        }

        let uuids: Vec<Uuid> = products.iter().map(|p| p.uuid.into_uuid()).collect();

        let images = query_as::<Postgres, ProductImageRecord>(LIST_PRODUCT_IMAGES_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await?;

        let mut by_product: FxHashMap<ProductUuid, Vec<ProductImageRecord>> = FxHashMap::default();

        for image in images {
            by_product.entry(image.product_uuid).or_default().push(image);
        }

        for product in products {
            product.images = by_product.remove(&product.uuid).unwrap_or_default();
        }

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for ProductImageRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductImageUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            image_url: row.try_get("image_url")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
