//! Categories service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        categories::{
            data::{CategoryUpdate, NewCategory},
            errors::CategoriesServiceError,
            records::{CategoryRecord, CategoryUuid},
            repository::PgCategoriesRepository,
        },
        validation::require_non_empty,
    },
};

#[derive(Debug, Clone)]
pub struct PgCategoriesService {
    db: Db,
    repository: PgCategoriesRepository,
}

impl PgCategoriesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCategoriesRepository::new(),
        }
    }
}

#[async_trait]
impl CategoriesService for PgCategoriesService {
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CategoriesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let categories = self.repository.list_categories(&mut tx).await?;

        tx.commit().await?;

        Ok(categories)
    }

    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        require_non_empty("name", &category.name)?;

        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_category(&mut tx, category.uuid, category.name.trim())
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_category(
        &self,
        category: CategoryUuid,
        update: CategoryUpdate,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        require_non_empty("name", &update.name)?;

        let mut tx = self.db.begin_transaction().await?;

        let updated = self
            .repository
            .update_category(&mut tx, category, update.name.trim())
            .await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait CategoriesService: Send + Sync {
    /// Retrieves all active categories ordered by name.
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CategoriesServiceError>;

    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Renames a category.
    async fn update_category(
        &self,
        category: CategoryUuid,
        update: CategoryUpdate,
    ) -> Result<CategoryRecord, CategoriesServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{domain::validation::ValidationError, test::TestContext};

    use super::*;

    #[tokio::test]
    async fn create_and_list_categories() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = CategoryUuid::new();

        let created = ctx
            .categories
            .create_category(NewCategory {
                uuid,
                name: "  Books ".to_string(),
            })
            .await?;

        assert_eq!(created.uuid, uuid);
        assert_eq!(created.name, "Books");

        let categories = ctx.categories.list_categories().await?;
        let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();

        assert!(names.contains(&"Books"), "expected Books in {names:?}");

        Ok(())
    }

    #[tokio::test]
    async fn create_category_rejects_blank_name() {
        let ctx = TestContext::new().await;

        let result = ctx
            .categories
            .create_category(NewCategory {
                uuid: CategoryUuid::new(),
                name: "   ".to_string(),
            })
            .await;

        assert!(matches!(
            result,
            Err(CategoriesServiceError::Validation(ValidationError::Empty { field: "name" }))
        ));
    }

    #[tokio::test]
    async fn update_category_renames() -> TestResult {
        let ctx = TestContext::new().await;

        let updated = ctx
            .categories
            .update_category(
                ctx.category_uuid,
                CategoryUpdate {
                    name: "Outdoor".to_string(),
                },
            )
            .await?;

        assert_eq!(updated.uuid, ctx.category_uuid);
        assert_eq!(updated.name, "Outdoor");

        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_category_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .categories
            .update_category(
                CategoryUuid::new(),
                CategoryUpdate {
                    name: "Ghost".to_string(),
                },
            )
            .await;

        assert!(
            matches!(result, Err(CategoriesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
