//! Line item lifecycle.
//!
//! | from      | event          | to        |
//! |-----------|----------------|-----------|
//! | (none)    | add            | active    |
//! | active    | set qty > 0    | active    |
//! | active    | set qty = 0    | removed   |
//! | active    | remove         | removed   |
//! | removed   | add / set > 0  | active    |
//! | removed   | set qty = 0    | removed   |
//! | removed   | remove         | removed   |
//! | active    | purchase       | purchased |
//! | removed   | purchase       | (deleted) |
//! | purchased | anything       | rejected  |

use std::fmt::{Display, Formatter, Result as FmtResult};

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(type_name = "cart_item_status", rename_all = "lowercase")]
pub enum LineItemStatus {
    Active,
    Removed,
    Purchased,
}

impl LineItemStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Removed => "removed",
            Self::Purchased => "purchased",
        }
    }
}

impl Display for LineItemStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineItemEvent {
    Add(u32),
    SetQuantity(u32),
    Remove,
    Purchase,
}

impl LineItemEvent {
    const fn name(self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::SetQuantity(_) => "update",
            Self::Remove => "remove",
            Self::Purchase => "purchase",
        }
    }
}

/// Status and quantity of a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineItemState {
    pub status: LineItemStatus,
    pub quantity: u32,
}

/// What happens to the stored line item after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Keep(LineItemState),
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("product already in cart")]
    AlreadyActive,

    #[error("quantity must be greater than zero")]
    ZeroQuantity,

    #[error("cannot {event} a {from} line item")]
    Invalid {
        from: LineItemStatus,
        event: &'static str,
    },
}

impl LineItemState {
    const REMOVED: Self = Self {
        status: LineItemStatus::Removed,
        quantity: 0,
    };

    const fn active(quantity: u32) -> Self {
        Self {
            status: LineItemStatus::Active,
            quantity,
        }
    }

    /// State of a line item created by adding a product to a cart.
    pub fn added(quantity: u32) -> Result<Self, TransitionError> {
        if quantity == 0 {
            return Err(TransitionError::ZeroQuantity);
        }

        Ok(Self::active(quantity))
    }

    pub fn apply(self, event: LineItemEvent) -> Result<Transition, TransitionError> {
        use LineItemEvent::{Add, Purchase, Remove, SetQuantity};
        use LineItemStatus::{Active, Purchased, Removed};

        match (self.status, event) {
            (Purchased, event) => Err(TransitionError::Invalid {
                from: Purchased,
                event: event.name(),
            }),
            (Active, Add(_)) => Err(TransitionError::AlreadyActive),
            (Removed, Add(0)) => Err(TransitionError::ZeroQuantity),
            (Removed, Add(quantity)) => Ok(Transition::Keep(Self::active(quantity))),
            (_, SetQuantity(0) | Remove) => Ok(Transition::Keep(Self::REMOVED)),
            (_, SetQuantity(quantity)) => Ok(Transition::Keep(Self::active(quantity))),
            (Active, Purchase) => Ok(Transition::Keep(Self {
                status: Purchased,
                quantity: self.quantity,
            })),
            (Removed, Purchase) => Ok(Transition::Delete),
        }
    }
}
