//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};

use crate::{
    database::Db,
    domain::{
        carts::{
            data::{CartItemUpdate, NewCartItem},
            errors::CartsServiceError,
            lifecycle::{LineItemEvent, LineItemState, Transition},
            purchase::{order_total, plan_purchase},
            records::{CartItemRecord, CartRecord, CartUuid},
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        inventory::PgInventoryLedger,
        orders::{records::OrderRecord, repository::PgOrdersRepository},
        products::records::ProductUuid,
        users::records::UserUuid,
        validation::require_positive,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    orders_repository: PgOrdersRepository,
    ledger: PgInventoryLedger,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            orders_repository: PgOrdersRepository::new(),
            ledger: PgInventoryLedger::new(),
        }
    }

    async fn require_active_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        self.carts_repository
            .get_active_cart(tx, user)
            .await?
            .ok_or(CartsServiceError::NotFound)
    }

    /// Fetch the user's active cart, creating it on first use.
    async fn ensure_active_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        if let Some(cart) = self.carts_repository.get_active_cart(tx, user).await? {
            return Ok(cart);
        }

        if let Some(cart) = self
            .carts_repository
            .create_active_cart(tx, CartUuid::new(), user)
            .await?
        {
            return Ok(cart);
        }

        // A concurrent request created the cart first.
        self.require_active_cart(tx, user).await
    }

    async fn require_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        product: ProductUuid,
    ) -> Result<CartItemRecord, CartsServiceError> {
        self.items_repository
            .find_cart_item(tx, cart, product)
            .await?
            .ok_or(CartsServiceError::ItemNotFound)
    }

    /// Persist the outcome of `event` on an existing line item.
    async fn apply_event(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: &CartItemRecord,
        event: LineItemEvent,
    ) -> Result<Option<CartItemRecord>, CartsServiceError> {
        match item.state().apply(event)? {
            Transition::Keep(state) if state == item.state() => Ok(Some(item.clone())),
            Transition::Keep(state) => Ok(Some(
                self.items_repository
                    .update_cart_item(tx, item.uuid, state)
                    .await?,
            )),
            Transition::Delete => {
                self.items_repository.delete_cart_item(tx, item.uuid).await?;

                Ok(None)
            }
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_active_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut cart = self.require_active_cart(&mut tx, user).await?;

        let items = self
            .items_repository
            .get_cart_items(&mut tx, &[cart.uuid])
            .await?;

        tx.commit().await?;

        cart.items.extend(items);

        Ok(cart)
    }

    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError> {
        require_positive("quantity", item.quantity)?;

        let mut tx = self.db.begin_transaction().await?;

        self.ledger
            .ensure_available(&mut tx, item.product_uuid, item.quantity)
            .await?;

        let cart = self.ensure_active_cart(&mut tx, user).await?;

        let existing = self
            .items_repository
            .find_cart_item(&mut tx, cart.uuid, item.product_uuid)
            .await?;

        let added = match existing {
            None => {
                self.items_repository
                    .create_cart_item(
                        &mut tx,
                        cart.uuid,
                        item.product_uuid,
                        LineItemState::added(item.quantity)?,
                    )
                    .await
                    .map_err(CartsServiceError::from_item_insert)?
            }
            Some(existing) => self
                .apply_event(&mut tx, &existing, LineItemEvent::Add(item.quantity))
                .await?
                .ok_or(CartsServiceError::ItemNotFound)?,
        };

        tx.commit().await?;

        Ok(added)
    }

    async fn update_item(
        &self,
        user: UserUuid,
        update: CartItemUpdate,
    ) -> Result<CartItemRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let cart = self.require_active_cart(&mut tx, user).await?;
        let item = self
            .require_item(&mut tx, cart.uuid, update.product_uuid)
            .await?;

        self.ledger
            .ensure_available(&mut tx, update.product_uuid, update.quantity)
            .await?;

        let updated = self
            .apply_event(&mut tx, &item, LineItemEvent::SetQuantity(update.quantity))
            .await?
            .ok_or(CartsServiceError::ItemNotFound)?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn remove_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let cart = self.require_active_cart(&mut tx, user).await?;
        let item = self.require_item(&mut tx, cart.uuid, product).await?;

        self.apply_event(&mut tx, &item, LineItemEvent::Remove)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn purchase(&self, user: UserUuid) -> Result<OrderRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let cart = self
            .carts_repository
            .lock_active_cart(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let items = self
            .items_repository
            .get_cart_items(&mut tx, &[cart.uuid])
            .await?;

        let plan = plan_purchase(&items)?;

        let mut decrements = Vec::with_capacity(plan.lines.len());

        for line in &plan.lines {
            let decrement = self
                .ledger
                .decrement(&mut tx, line.product_uuid, line.purchased.quantity)
                .await?;

            self.items_repository
                .update_cart_item(&mut tx, line.item_uuid, line.purchased)
                .await?;

            decrements.push(decrement);
        }

        for item in &plan.discarded {
            self.items_repository.delete_cart_item(&mut tx, *item).await?;
        }

        let total = order_total(&decrements);

        if self.carts_repository.mark_purchased(&mut tx, cart.uuid).await? == 0 {
            return Err(CartsServiceError::NotFound);
        }

        let order = self
            .orders_repository
            .create_order(&mut tx, cart.uuid, user, total)
            .await?;

        tx.commit().await?;

        tracing::info!(
            order = %order.uuid,
            cart = %cart.uuid,
            lines = decrements.len(),
            total = %total,
            "cart purchased"
        );

        Ok(order)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the user's active cart with all of its line items.
    async fn get_active_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError>;

    /// Put a product in the user's active cart, creating the cart if needed.
    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// Change the quantity of a product in the active cart. Zero removes it.
    async fn update_item(
        &self,
        user: UserUuid,
        update: CartItemUpdate,
    ) -> Result<CartItemRecord, CartsServiceError>;

    async fn remove_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<(), CartsServiceError>;

    /// Close the active cart and open an order, taking stock for every
    /// active line item. Nothing is written unless every step succeeds.
    async fn purchase(&self, user: UserUuid) -> Result<OrderRecord, CartsServiceError>;
}
