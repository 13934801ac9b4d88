//! Category Handlers

pub(crate) mod create;
pub(crate) mod index;
pub(crate) mod update;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::categories::records::CategoryRecord;

/// Category Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CategoryResponse {
    pub uuid: Uuid,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CategoryRecord> for CategoryResponse {
    fn from(category: CategoryRecord) -> Self {
        Self {
            uuid: category.uuid.into(),
            name: category.name,
            created_at: category.created_at.to_string(),
            updated_at: category.updated_at.to_string(),
        }
    }
}

/// Category name payload, shared by create and rename.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryRequest {
    pub name: String,
}
