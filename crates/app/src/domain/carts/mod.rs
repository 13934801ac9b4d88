//! Carts

pub mod data;
pub mod errors;
pub mod lifecycle;
pub mod purchase;
pub mod records;
pub(crate) mod repositories;
pub mod service;

pub use errors::CartsServiceError;
pub use service::*;
