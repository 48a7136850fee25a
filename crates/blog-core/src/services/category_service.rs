use std::sync::Arc;

use tracing::instrument;

use super::finish;
use crate::domain::{Category, CategoryId, PostId};
use crate::error::RepoResult;
use crate::ports::{CategoryRepository, UnitOfWork};

/// Category use-cases.
#[derive(Clone)]
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
    uow: Arc<dyn UnitOfWork>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryRepository>, uow: Arc<dyn UnitOfWork>) -> Self {
        Self { categories, uow }
    }

    #[instrument(skip(self))]
    pub async fn create_category(
        &self,
        name: String,
        description: Option<String>,
    ) -> RepoResult<Category> {
        let category = self
            .categories
            .create(Category::new(name, description))
            .await?;
        tracing::info!(category_id = category.id, "Category created");
        Ok(category)
    }

    pub async fn get_category_by_id(&self, id: CategoryId) -> RepoResult<Category> {
        self.categories.find_by_id(id).await
    }

    pub async fn get_all_categories(&self) -> RepoResult<Vec<Category>> {
        self.categories.find_all().await
    }

    /// Load the category, replace name and description, and persist it.
    #[instrument(skip(self))]
    pub async fn update_category(
        &self,
        id: CategoryId,
        name: String,
        description: Option<String>,
    ) -> RepoResult<Category> {
        let tx = self.uow.begin().await?;
        let result = async {
            let mut category = tx.categories().find_by_id(id).await?;
            category.name = name;
            category.description = description;
            tx.categories().update(category).await
        }
        .await;

        finish(tx, result).await
    }

    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: CategoryId) -> RepoResult<()> {
        self.categories.delete(id).await?;
        tracing::info!(category_id = id, "Category deleted");
        Ok(())
    }

    pub async fn get_categories_by_post_id(&self, post_id: PostId) -> RepoResult<Vec<Category>> {
        self.categories.find_by_post_id(post_id).await
    }
}
