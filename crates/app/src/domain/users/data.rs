//! Users Data

use crate::{
    auth::credentials::Password,
    domain::{
        users::records::UserUuid,
        validation::{
            MIN_CREDENTIAL_LENGTH, ValidationError, require_email, require_min_length,
        },
    },
};

/// New User Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub username: String,
    pub email: String,
    pub password: Password,
}

impl NewUser {
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        require_min_length("username", &self.username, MIN_CREDENTIAL_LENGTH)?;
        require_email(&self.email)?;
        require_min_length("password", self.password.expose(), MIN_CREDENTIAL_LENGTH)
    }
}

/// User Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct UserUpdate {
    pub username: String,
    pub email: String,
}

impl UserUpdate {
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        require_min_length("username", &self.username, MIN_CREDENTIAL_LENGTH)?;
        require_email(&self.email)
    }
}
