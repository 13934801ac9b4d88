//! App Context

use std::sync::Arc;

use jiff::SignedDuration;
use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService, credentials::CredentialService},
    database::{self, Db},
    domain::{
        carts::{CartsService, PgCartsService},
        categories::{CategoriesService, PgCategoriesService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
        users::{PgUsersService, UsersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub users: Arc<dyn UsersService>,
    pub auth: Arc<dyn AuthService>,
    pub categories: Arc<dyn CategoriesService>,
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Wire every service to one database handle and credential backend.
    #[must_use]
    pub fn new(db: Db, credentials: Arc<dyn CredentialService>, token_ttl: SignedDuration) -> Self {
        Self {
            users: Arc::new(PgUsersService::new(db.clone(), Arc::clone(&credentials))),
            auth: Arc::new(PgAuthService::new(db.clone(), credentials, token_ttl)),
            categories: Arc::new(PgCategoriesService::new(db.clone())),
            products: Arc::new(PgProductsService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db)),
        }
    }

    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        credentials: Arc<dyn CredentialService>,
        token_ttl: SignedDuration,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::new(Db::new(pool), credentials, token_ttl))
    }
}
