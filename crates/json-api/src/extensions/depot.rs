//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};
use storefront_app::domain::users::records::UserUuid;

const USER_UUID_DEPOT_KEY: &str = "user_uuid";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Record the authenticated user for downstream handlers.
    fn insert_user_uuid(&mut self, user: UserUuid);

    fn user_uuid_or_401(&self) -> Result<UserUuid, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_user_uuid(&mut self, user: UserUuid) {
        self.insert(USER_UUID_DEPOT_KEY, user);
    }

    fn user_uuid_or_401(&self) -> Result<UserUuid, StatusError> {
        self.get::<UserUuid>(USER_UUID_DEPOT_KEY)
            .copied()
            .map_err(|_ignored| StatusError::unauthorized())
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn missing_user_is_unauthorized() {
        let depot = Depot::new();

        let status = depot.user_uuid_or_401().map_err(|error| error.code);

        assert_eq!(status, Err(StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn inserted_user_is_returned() {
        let user = UserUuid::from_uuid(Uuid::nil());
        let mut depot = Depot::new();

        depot.insert_user_uuid(user);

        assert_eq!(depot.user_uuid_or_401().ok(), Some(user));
    }
}
