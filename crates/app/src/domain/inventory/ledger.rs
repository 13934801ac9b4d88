//! Inventory Ledger

use rust_decimal::Decimal;
use sqlx::{Postgres, Row, Transaction, postgres::PgRow, query};

use crate::{
    database::{quantity_param, try_get_quantity},
    domain::{inventory::errors::InventoryError, products::records::ProductUuid},
};

const DECREMENT_STOCK_SQL: &str = include_str!("sql/decrement_stock.sql");
const GET_STOCK_LEVEL_SQL: &str = include_str!("sql/get_stock_level.sql");

/// Current price and quantity on hand of an active product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockLevel {
    pub unit_price: Decimal,
    pub available: u32,
}

/// Result of removing stock for a purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockDecrement {
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub remaining: u32,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgInventoryLedger;

impl PgInventoryLedger {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Read the stock level of an active product.
    pub(crate) async fn stock_level(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<StockLevel, InventoryError> {
        query(GET_STOCK_LEVEL_SQL)
            .bind(product.into_uuid())
            .fetch_optional(&mut **tx)
            .await?
            .as_ref()
            .map(stock_level_from_row)
            .transpose()?
            .ok_or(InventoryError::NotFound(product))
    }

    /// Check that `requested` units of an active product are on hand.
    pub(crate) async fn ensure_available(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        requested: u32,
    ) -> Result<StockLevel, InventoryError> {
        let level = self.stock_level(tx, product).await?;

        if requested > level.available {
            return Err(InventoryError::InsufficientStock {
                product,
                requested,
                available: level.available,
            });
        }

        Ok(level)
    }

    /// Remove `quantity` units of stock.
    ///
    /// The conditional update holds the product row lock until the caller's
    /// transaction ends, so concurrent purchases of one product serialize here.
    pub(crate) async fn decrement(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<StockDecrement, InventoryError> {
        let row = query(DECREMENT_STOCK_SQL)
            .bind(product.into_uuid())
            .bind(quantity_param(quantity)?)
            .fetch_optional(&mut **tx)
            .await?;

        if let Some(row) = row {
            let level = stock_level_from_row(&row)?;

            return Ok(StockDecrement {
                product_uuid: product,
                quantity,
                unit_price: level.unit_price,
                remaining: level.available,
            });
        }

        let level = self.stock_level(tx, product).await?;

        Err(InventoryError::InsufficientStock {
            product,
            requested: quantity,
            available: level.available,
        })
    }
}

fn stock_level_from_row(row: &PgRow) -> Result<StockLevel, sqlx::Error> {
    Ok(StockLevel {
        unit_price: row.try_get("price")?,
        available: try_get_quantity(row, "quantity")?,
    })
}
