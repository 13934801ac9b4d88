//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::{quantity_param, try_get_quantity},
    domain::{
        categories::records::CategoryUuid,
        products::{
            data::{NewProduct, ProductUpdate},
            records::{ProductRecord, ProductUuid},
        },
        users::records::UserUuid,
    },
};

const LIST_PRODUCTS_SQL: &str = include_str!("../sql/list_products.sql");
const LIST_USER_PRODUCTS_SQL: &str = include_str!("../sql/list_user_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("../sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("../sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("../sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("../sql/delete_product.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_user_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_USER_PRODUCTS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Fetch an active product.
    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
        product: &NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(owner.into_uuid())
            .bind(product.category_uuid.into_uuid())
            .bind(&product.title)
            .bind(&product.description)
            .bind(product.price)
            .bind(quantity_param(product.quantity)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        update: &ProductUpdate,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(&update.title)
            .bind(&update.description)
            .bind(update.price)
            .bind(quantity_param(update.quantity)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            category_uuid: CategoryUuid::from_uuid(row.try_get("category_uuid")?),
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            price: row.try_get("price")?,
            quantity: try_get_quantity(row, "quantity")?,
            status: row.try_get("status")?,
            images: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
