//! Products service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};

use crate::{
    database::Db,
    domain::{
        products::{
            data::{ImageUrls, NewProduct, ProductUpdate, validate_image_urls},
            errors::ProductsServiceError,
            records::{ProductImageRecord, ProductRecord, ProductUuid},
            repositories::{PgProductImagesRepository, PgProductsRepository},
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    products: PgProductsRepository,
    images: PgProductImagesRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            products: PgProductsRepository::new(),
            images: PgProductImagesRepository::new(),
        }
    }

    /// Load an active product and check that `owner` may change it.
    async fn get_owned_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let record = self.products.get_product(tx, product).await?;

        if record.user_uuid != owner {
            return Err(ProductsServiceError::Forbidden);
        }

        Ok(record)
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut products = self.products.list_products(&mut tx).await?;

        self.images.attach_images(&mut tx, &mut products).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn list_user_products(
        &self,
        user: UserUuid,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut products = self.products.list_user_products(&mut tx, user).await?;

        self.images.attach_images(&mut tx, &mut products).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut record = self.products.get_product(&mut tx, product).await?;

        self.images
            .attach_images(&mut tx, std::slice::from_mut(&mut record))
            .await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn create_product(
        &self,
        owner: UserUuid,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        product.validate()?;

        let mut tx = self.db.begin_transaction().await?;

        let mut created = self.products.create_product(&mut tx, owner, &product).await?;

        created.images = self
            .images
            .create_images(&mut tx, created.uuid, &product.image_urls)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        owner: UserUuid,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.get_owned_product(&mut tx, owner, product).await?;

        update.validate()?;

        let mut updated = self.products.update_product(&mut tx, product, &update).await?;

        self.images
            .attach_images(&mut tx, std::slice::from_mut(&mut updated))
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(
        &self,
        owner: UserUuid,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.get_owned_product(&mut tx, owner, product).await?;

        let rows_affected = self.products.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn add_images(
        &self,
        owner: UserUuid,
        product: ProductUuid,
        image_urls: ImageUrls,
    ) -> Result<Vec<ProductImageRecord>, ProductsServiceError> {
        validate_image_urls(&image_urls)?;

        let mut tx = self.db.begin_transaction().await?;

        self.get_owned_product(&mut tx, owner, product).await?;

        let images = self
            .images
            .create_images(&mut tx, product, &image_urls)
            .await?;

        tx.commit().await?;

        Ok(images)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all active products with their images.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieves every product a user has listed, whatever its status.
    async fn list_user_products(
        &self,
        user: UserUuid,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single active product.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a product and its image references in one transaction.
    async fn create_product(
        &self,
        owner: UserUuid,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    async fn update_product(
        &self,
        owner: UserUuid,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Soft deletes a product.
    async fn delete_product(
        &self,
        owner: UserUuid,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError>;

    async fn add_images(
        &self,
        owner: UserUuid,
        product: ProductUuid,
        image_urls: ImageUrls,
    ) -> Result<Vec<ProductImageRecord>, ProductsServiceError>;
}
