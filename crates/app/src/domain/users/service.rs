//! Users service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::{
        PgAuthRepository,
        credentials::{CredentialService, build_password_input},
    },
    database::Db,
    domain::users::{
        data::{NewUser, UserUpdate},
        errors::UsersServiceError,
        records::{UserRecord, UserUuid},
        repository::PgUsersRepository,
    },
};

#[derive(Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
    tokens: PgAuthRepository,
    credentials: Arc<dyn CredentialService>,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db, credentials: Arc<dyn CredentialService>) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
            tokens: PgAuthRepository::new(),
            credentials,
        }
    }
}

impl std::fmt::Debug for PgUsersService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgUsersService")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        user.validate()?;

        let verifier = self
            .credentials
            .hmac(&build_password_input(user.uuid.into_uuid(), &user.password))
            .await?;

        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_user(&mut tx, user.uuid, &user.username, &user.email, &verifier)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let record = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn update_user(
        &self,
        session: UserUuid,
        user: UserUuid,
        update: UserUpdate,
    ) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.repository.get_user(&mut tx, user).await?;

        if session != user {
            return Err(UsersServiceError::Forbidden);
        }

        update.validate()?;

        let updated = self
            .repository
            .update_user(&mut tx, user, &update.username, &update.email)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_user(&self, session: UserUuid, user: UserUuid) -> Result<(), UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.repository.get_user(&mut tx, user).await?;

        if session != user {
            return Err(UsersServiceError::Forbidden);
        }

        if self.repository.delete_user(&mut tx, user).await? == 0 {
            return Err(UsersServiceError::NotFound);
        }

        let revoked = self.tokens.revoke_user_api_tokens(&mut tx, user).await?;

        tx.commit().await?;

        tracing::debug!(user = %user, revoked, "deleted user and revoked tokens");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Register a new account.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Retrieve a user by UUID regardless of status.
    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;

    /// Update a user's profile. Only the account owner may do so.
    async fn update_user(
        &self,
        session: UserUuid,
        user: UserUuid,
        update: UserUpdate,
    ) -> Result<UserRecord, UsersServiceError>;

    /// Soft delete an account and revoke its tokens.
    async fn delete_user(&self, session: UserUuid, user: UserUuid) -> Result<(), UsersServiceError>;
}
