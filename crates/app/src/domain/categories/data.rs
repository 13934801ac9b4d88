//! Categories Data

use crate::domain::categories::records::CategoryUuid;

/// New Category Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub uuid: CategoryUuid,
    pub name: String,
}

/// Category Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryUpdate {
    pub name: String,
}
