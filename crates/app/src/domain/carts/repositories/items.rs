//! Cart Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::{quantity_param, try_get_quantity},
    domain::{
        carts::{
            lifecycle::LineItemState,
            records::{CartItemRecord, CartItemUuid, CartUuid},
        },
        products::records::ProductUuid,
    },
};

const GET_CART_ITEMS_SQL: &str = include_str!("../sql/get_cart_items.sql");
const FIND_CART_ITEM_SQL: &str = include_str!("../sql/find_cart_item.sql");
const CREATE_CART_ITEM_SQL: &str = include_str!("../sql/create_cart_item.sql");
const UPDATE_CART_ITEM_SQL: &str = include_str!("../sql/update_cart_item.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("../sql/delete_cart_item.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        carts: &[CartUuid],
    ) -> Result<Vec<CartItemRecord>, sqlx::Error> {
        let uuids: Vec<Uuid> = carts.iter().map(|cart| cart.into_uuid()).collect();

        query_as::<Postgres, CartItemRecord>(GET_CART_ITEMS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn find_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        product: ProductUuid,
    ) -> Result<Option<CartItemRecord>, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(FIND_CART_ITEM_SQL)
            .bind(cart.into_uuid())
            .bind(product.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        product: ProductUuid,
        state: LineItemState,
    ) -> Result<CartItemRecord, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(CREATE_CART_ITEM_SQL)
            .bind(CartItemUuid::new().into_uuid())
            .bind(cart.into_uuid())
            .bind(product.into_uuid())
            .bind(quantity_param(state.quantity)?)
            .bind(state.status)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: CartItemUuid,
        state: LineItemState,
    ) -> Result<CartItemRecord, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(UPDATE_CART_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(state.status)
            .bind(quantity_param(state.quantity)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: CartItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ITEM_SQL)
            .bind(item.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartItemUuid::from_uuid(row.try_get("uuid")?),
            cart_uuid: CartUuid::from_uuid(row.try_get("cart_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            quantity: try_get_quantity(row, "quantity")?,
            status: row.try_get("status")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
