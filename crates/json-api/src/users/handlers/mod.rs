//! User Handlers

pub(crate) mod delete;
pub(crate) mod login;
pub(crate) mod me;
pub(crate) mod signup;
pub(crate) mod update;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::users::records::UserRecord;

/// User Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserResponse {
    pub uuid: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            uuid: user.uuid.into(),
            username: user.username,
            email: user.email,
            created_at: user.created_at.to_string(),
            updated_at: user.updated_at.to_string(),
        }
    }
}
