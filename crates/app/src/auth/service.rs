//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use uuid::Uuid;

use crate::{
    auth::{
        ApiTokenSecret, ApiTokenVersion, AuthServiceError, IssuedApiToken, NewApiToken, Session,
        build_verifier_input,
        credentials::{CredentialService, Password, build_password_input},
        format_api_token, parse_api_token,
        repository::PgAuthRepository,
    },
    database::Db,
    domain::users::{records::UserUuid, repository::PgUsersRepository},
};

/// Default lifetime of a login token.
pub const DEFAULT_TOKEN_TTL: SignedDuration = SignedDuration::from_hours(15 * 24);

#[derive(Clone)]
pub struct PgAuthService {
    db: Db,
    repository: PgAuthRepository,
    users: PgUsersRepository,
    credentials: Arc<dyn CredentialService>,
    token_ttl: SignedDuration,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db, credentials: Arc<dyn CredentialService>, token_ttl: SignedDuration) -> Self {
        Self {
            db,
            repository: PgAuthRepository::new(),
            users: PgUsersRepository::new(),
            credentials,
            token_ttl,
        }
    }

    async fn touch_last_used(&self, token_uuid: Uuid) -> Result<(), AuthServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.repository
            .touch_api_token_last_used(&mut tx, token_uuid)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}

impl std::fmt::Debug for PgAuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgAuthService")
            .field("db", &self.db)
            .field("token_ttl", &self.token_ttl)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn login(&self, email: &str, password: Password) -> Result<Session, AuthServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let credentials = self
            .users
            .find_credentials_by_email(&mut tx, email)
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        let valid = self
            .credentials
            .verify(
                &build_password_input(credentials.uuid.into_uuid(), &password),
                &credentials.password_verifier,
            )
            .await?;

        if !valid {
            return Err(AuthServiceError::InvalidCredentials);
        }

        let token_uuid = Uuid::now_v7();
        let version = ApiTokenVersion::V1;
        let secret = ApiTokenSecret::generate();

        let token_hash = self
            .credentials
            .hmac(&build_verifier_input(
                token_uuid,
                version,
                credentials.uuid,
                &secret,
            ))
            .await?;

        let expires_at = Timestamp::now()
            .checked_add(self.token_ttl)
            .map_err(AuthServiceError::Expiry)?;

        let metadata = self
            .repository
            .create_api_token(
                &mut tx,
                &NewApiToken {
                    uuid: token_uuid,
                    user_uuid: credentials.uuid,
                    version,
                    token_hash,
                    expires_at,
                },
            )
            .await?;

        let user = self.users.get_user(&mut tx, credentials.uuid).await?;

        tx.commit().await?;

        Ok(Session {
            user,
            token: IssuedApiToken {
                token: format_api_token(token_uuid, version, &secret),
                metadata,
            },
        })
    }

    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError> {
        let parsed_token = parse_api_token(bearer_token).map_err(|_| AuthServiceError::NotFound)?;

        let mut tx = self.db.begin_transaction().await?;

        let token = self
            .repository
            .find_active_api_token(&mut tx, parsed_token.token_uuid, parsed_token.version)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        tx.commit().await?;

        let verifier_input = build_verifier_input(
            parsed_token.token_uuid,
            token.version,
            token.user_uuid,
            &parsed_token.secret,
        );

        let valid = self
            .credentials
            .verify(&verifier_input, &token.token_hash)
            .await?;

        if !valid {
            return Err(AuthServiceError::NotFound);
        }

        // Best effort: authentication does not depend on this write.
        if let Err(error) = self.touch_last_used(parsed_token.token_uuid).await {
            tracing::warn!(error = %error, "failed to record token use");
        }

        Ok(token.user_uuid)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchange an email and password for a fresh session token.
    async fn login(&self, email: &str, password: Password) -> Result<Session, AuthServiceError>;

    /// Resolve a bearer token to the user it was issued to.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError>;
}
