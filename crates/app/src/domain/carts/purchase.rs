//! Purchase planning.

use rust_decimal::Decimal;

use crate::domain::{
    carts::{
        lifecycle::{LineItemEvent, LineItemState, Transition, TransitionError},
        records::{CartItemRecord, CartItemUuid},
    },
    inventory::StockDecrement,
    products::records::ProductUuid,
};

/// A line item that will be bought.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedLine {
    pub item_uuid: CartItemUuid,
    pub product_uuid: ProductUuid,
    pub purchased: LineItemState,
}

/// The effect of purchasing a cart on each of its line items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurchasePlan {
    /// Ordered by product so concurrent purchases lock stock rows consistently.
    pub lines: Vec<PlannedLine>,

    /// Removed items that are dropped from the cart.
    pub discarded: Vec<CartItemUuid>,
}

pub fn plan_purchase(items: &[CartItemRecord]) -> Result<PurchasePlan, TransitionError> {
    let mut plan = PurchasePlan::default();

    for item in items {
        match item.state().apply(LineItemEvent::Purchase)? {
            Transition::Keep(purchased) => plan.lines.push(PlannedLine {
                item_uuid: item.uuid,
                product_uuid: item.product_uuid,
                purchased,
            }),
            Transition::Delete => plan.discarded.push(item.uuid),
        }
    }

    plan.lines.sort_by_key(|line| line.product_uuid);

    Ok(plan)
}

/// Sum of quantity times unit price over every decremented line.
#[must_use]
pub fn order_total<'a>(decrements: impl IntoIterator<Item = &'a StockDecrement>) -> Decimal {
    decrements
        .into_iter()
        .map(|line| Decimal::from(line.quantity) * line.unit_price)
        .sum()
}
