//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use sqlx::{Postgres, Transaction};

use crate::{
    database::Db,
    domain::{
        carts::{
            records::{CartRecord, CartUuid},
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        orders::{
            errors::OrdersServiceError,
            records::{OrderDetails, OrderRecord, OrderUuid},
            repository::PgOrdersRepository,
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders: PgOrdersRepository,
    carts: PgCartsRepository,
    items: PgCartItemsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders: PgOrdersRepository::new(),
            carts: PgCartsRepository::new(),
            items: PgCartItemsRepository::new(),
        }
    }

    /// Pair each order with its purchased cart and line items.
    async fn with_carts(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: Vec<OrderRecord>,
    ) -> Result<Vec<OrderDetails>, OrdersServiceError> {
        let cart_uuids: Vec<CartUuid> = orders.iter().map(|order| order.cart_uuid).collect();

        let mut carts: FxHashMap<CartUuid, CartRecord> = self
            .carts
            .list_carts(tx, &cart_uuids)
            .await?
            .into_iter()
            .map(|cart| (cart.uuid, cart))
            .collect();

        for item in self.items.get_cart_items(tx, &cart_uuids).await? {
            if let Some(cart) = carts.get_mut(&item.cart_uuid) {
                cart.items.push(item);
            }
        }

        orders
            .into_iter()
            .map(|order| {
                let cart = carts
                    .remove(&order.cart_uuid)
                    .ok_or(OrdersServiceError::NotFound)?;

                Ok(OrderDetails { order, cart })
            })
            .collect()
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderDetails>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let orders = self.orders.list_user_orders(&mut tx, user).await?;
        let details = self.with_carts(&mut tx, orders).await?;

        tx.commit().await?;

        Ok(details)
    }

    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderDetails, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let order = self.orders.get_user_order(&mut tx, user, order).await?;

        let details = self
            .with_carts(&mut tx, vec![order])
            .await?
            .pop()
            .ok_or(OrdersServiceError::NotFound)?;

        tx.commit().await?;

        Ok(details)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Retrieves a user's orders, newest first.
    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderDetails>, OrdersServiceError>;

    /// Retrieve one of the user's orders. Other users' orders are not found.
    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderDetails, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::carts::{CartsService, data::NewCartItem, lifecycle::LineItemStatus},
        test::TestContext,
    };

    use super::*;

    #[tokio::test]
    async fn orders_include_the_purchased_cart_and_items() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx.create_product(Decimal::new(500, 2), 10).await?;

        ctx.carts
            .add_item(
                ctx.user_uuid,
                NewCartItem {
                    product_uuid: product.uuid,
                    quantity: 2,
                },
            )
            .await?;

        let order = ctx.carts.purchase(ctx.user_uuid).await?;

        let listed = ctx.orders.list_orders(ctx.user_uuid).await?;

        assert_eq!(listed.len(), 1);

        let details = ctx.orders.get_order(ctx.user_uuid, order.uuid).await?;

        assert_eq!(details.order, order);
        assert_eq!(details.cart.uuid, order.cart_uuid);
        assert_eq!(details.cart.items.len(), 1);
        assert!(
            details
                .cart
                .items
                .iter()
                .all(|item| item.status == LineItemStatus::Purchased)
        );
        assert_eq!(listed.first(), Some(&details));

        Ok(())
    }

    #[tokio::test]
    async fn orders_list_newest_first() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx.create_product(Decimal::ONE, 10).await?;
        let mut purchased = Vec::new();

        for _ in 0..2 {
            ctx.carts
                .add_item(
                    ctx.user_uuid,
                    NewCartItem {
                        product_uuid: product.uuid,
                        quantity: 1,
                    },
                )
                .await?;

            purchased.push(ctx.carts.purchase(ctx.user_uuid).await?.uuid);
        }

        let listed: Vec<OrderUuid> = ctx
            .orders
            .list_orders(ctx.user_uuid)
            .await?
            .iter()
            .map(|details| details.order.uuid)
            .collect();

        purchased.reverse();

        assert_eq!(listed, purchased);

        Ok(())
    }

    #[tokio::test]
    async fn other_users_orders_are_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let other = ctx.create_user("otherbuyer").await?;
        let product = ctx.create_product(Decimal::ONE, 10).await?;

        ctx.carts
            .add_item(
                ctx.user_uuid,
                NewCartItem {
                    product_uuid: product.uuid,
                    quantity: 1,
                },
            )
            .await?;

        let order = ctx.carts.purchase(ctx.user_uuid).await?;

        let result = ctx.orders.get_order(other.uuid, order.uuid).await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
        assert!(ctx.orders.list_orders(other.uuid).await?.is_empty());

        Ok(())
    }
}
