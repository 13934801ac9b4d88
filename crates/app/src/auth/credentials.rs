//! Credential service abstraction over a keyed HMAC backend.

use std::fmt;

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;
use zeroize::Zeroize;

use crate::auth::openbao::OpenBaoError;

/// Produces and checks opaque verifiers for secrets.
///
/// Passwords and token secrets never reach storage; only the verifier does.
#[automock]
#[async_trait]
pub trait CredentialService: Send + Sync {
    /// Compute the verifier for `input`.
    async fn hmac(&self, input: &[u8]) -> Result<String, CredentialError>;

    /// Check `input` against a previously stored verifier.
    async fn verify(&self, input: &[u8], verifier: &str) -> Result<bool, CredentialError>;
}

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("credential backend error")]
    Backend(#[from] OpenBaoError),
}

/// A plaintext password held only long enough to derive a verifier.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(**redacted**)")
    }
}

impl Drop for Password {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Build the HMAC input for a user's password.
///
/// Format: `{user_uuid_hex}:{password}`
#[must_use]
pub fn build_password_input(user_uuid: uuid::Uuid, password: &Password) -> Vec<u8> {
    format!("{}:{}", user_uuid.simple(), password.expose()).into_bytes()
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn password_debug_is_redacted() {
        let password = Password::new("hunter2hunter2");

        assert_eq!(format!("{password:?}"), "Password(**redacted**)");
    }

    #[test]
    fn password_input_is_salted_with_the_user() {
        let password = Password::new("correct horse");

        let first = build_password_input(Uuid::nil(), &password);
        let second = build_password_input(Uuid::max(), &password);

        assert_ne!(first, second);
        assert!(first.ends_with(b":correct horse"));
    }
}
