//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    carts::records::CartUuid,
    orders::records::{OrderRecord, OrderUuid},
    users::records::UserUuid,
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const LIST_USER_ORDERS_SQL: &str = include_str!("sql/list_user_orders.sql");
const GET_USER_ORDER_SQL: &str = include_str!("sql/get_user_order.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        user: UserUuid,
        total_price: Decimal,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(OrderUuid::new().into_uuid())
            .bind(cart.into_uuid())
            .bind(user.into_uuid())
            .bind(total_price)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_user_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_USER_ORDERS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_user_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_USER_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            cart_uuid: CartUuid::from_uuid(row.try_get("cart_uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            total_price: row.try_get("total_price")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
