//! Carts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::{
    carts::lifecycle::TransitionError,
    inventory::InventoryError,
    products::records::ProductUuid,
    validation::ValidationError,
};

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("cart not found")]
    NotFound,

    #[error("product not found in cart")]
    ItemNotFound,

    #[error("product {0} not found")]
    ProductNotFound(ProductUuid),

    #[error("product already in cart")]
    AlreadyInCart,

    #[error("cart already exists")]
    AlreadyExists,

    #[error("available only {available} items of product {product}, requested {requested}")]
    InsufficientStock {
        product: ProductUuid,
        requested: u32,
        available: u32,
    },

    #[error(transparent)]
    InvalidTransition(TransitionError),

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl CartsServiceError {
    /// Map a failed line item insert. A unique violation means a concurrent
    /// request put the product in the cart first.
    pub(crate) fn from_item_insert(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyInCart,
            _ => Self::from(error),
        }
    }
}

impl From<InventoryError> for CartsServiceError {
    fn from(error: InventoryError) -> Self {
        match error {
            InventoryError::NotFound(product) => Self::ProductNotFound(product),
            InventoryError::InsufficientStock {
                product,
                requested,
                available,
            } => Self::InsufficientStock {
                product,
                requested,
                available,
            },
            InventoryError::Sql(error) => Self::from(error),
        }
    }
}

impl From<TransitionError> for CartsServiceError {
    fn from(error: TransitionError) -> Self {
        match error {
            TransitionError::AlreadyActive => Self::AlreadyInCart,
            TransitionError::ZeroQuantity => {
                Self::Validation(ValidationError::NotPositive { field: "quantity" })
            }
            TransitionError::Invalid { .. } => Self::InvalidTransition(error),
        }
    }
}
