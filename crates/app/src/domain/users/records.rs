//! User Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "user_status", rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Deleted,
}

/// User Record
///
/// The password verifier is never loaded into this record.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub username: String,
    pub email: String,
    pub status: UserStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Stored verifier for an active user, used only during login.
#[derive(Debug, Clone)]
pub(crate) struct UserCredentials {
    pub uuid: UserUuid,
    pub password_verifier: String,
}
