//! Category Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Category UUID
pub type CategoryUuid = TypedUuid<CategoryRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "category_status", rename_all = "lowercase")]
pub enum CategoryStatus {
    Active,
}

/// Category Record
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRecord {
    pub uuid: CategoryUuid,
    pub name: String,
    pub status: CategoryStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
