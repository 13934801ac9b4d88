//! Inventory
//!
//! Stock quantities live on the product row. Every change runs inside the
//! caller's transaction so it commits or rolls back with the surrounding
//! cart or purchase operation.

mod errors;
mod ledger;

pub use errors::InventoryError;
pub(crate) use ledger::PgInventoryLedger;
pub use ledger::{StockDecrement, StockLevel};
