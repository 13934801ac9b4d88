//! Carts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    carts::records::{CartRecord, CartUuid},
    users::records::UserUuid,
};

const GET_ACTIVE_CART_SQL: &str = include_str!("../sql/get_active_cart.sql");
const LOCK_ACTIVE_CART_SQL: &str = include_str!("../sql/lock_active_cart.sql");
const CREATE_ACTIVE_CART_SQL: &str = include_str!("../sql/create_active_cart.sql");
const MARK_CART_PURCHASED_SQL: &str = include_str!("../sql/mark_cart_purchased.sql");
const LIST_CARTS_SQL: &str = include_str!("../sql/list_carts.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_active_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Option<CartRecord>, sqlx::Error> {
        query_as::<Postgres, CartRecord>(GET_ACTIVE_CART_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Like [`Self::get_active_cart`], holding the cart row lock until the
    /// transaction ends.
    pub(crate) async fn lock_active_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Option<CartRecord>, sqlx::Error> {
        query_as::<Postgres, CartRecord>(LOCK_ACTIVE_CART_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Insert an active cart, or return `None` if the user already has one.
    pub(crate) async fn create_active_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        user: UserUuid,
    ) -> Result<Option<CartRecord>, sqlx::Error> {
        query_as::<Postgres, CartRecord>(CREATE_ACTIVE_CART_SQL)
            .bind(cart.into_uuid())
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn mark_purchased(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(MARK_CART_PURCHASED_SQL)
            .bind(cart.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_carts(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        carts: &[CartUuid],
    ) -> Result<Vec<CartRecord>, sqlx::Error> {
        let uuids: Vec<Uuid> = carts.iter().map(|cart| cart.into_uuid()).collect();

        query_as::<Postgres, CartRecord>(LIST_CARTS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CartRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            status: row.try_get("status")?,
            items: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
