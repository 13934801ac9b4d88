//! Categories Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::categories::records::{CategoryRecord, CategoryUuid};

const LIST_CATEGORIES_SQL: &str = include_str!("sql/list_categories.sql");
const CREATE_CATEGORY_SQL: &str = include_str!("sql/create_category.sql");
const UPDATE_CATEGORY_SQL: &str = include_str!("sql/update_category.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCategoriesRepository;

impl PgCategoriesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<CategoryRecord>, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(LIST_CATEGORIES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryUuid,
        name: &str,
    ) -> Result<CategoryRecord, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(CREATE_CATEGORY_SQL)
            .bind(category.into_uuid())
            .bind(name)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryUuid,
        name: &str,
    ) -> Result<CategoryRecord, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(UPDATE_CATEGORY_SQL)
            .bind(category.into_uuid())
            .bind(name)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CategoryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CategoryUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            status: row.try_get("status")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
