//! Authentication

pub mod credentials;
mod errors;
mod models;
pub mod openbao;
mod repository;
mod service;
mod token;

pub use errors::*;
pub use models::*;
pub use openbao::{OpenBaoClient, OpenBaoConfig, OpenBaoError};
pub(crate) use repository::PgAuthRepository;
pub use service::*;
pub use token::*;
