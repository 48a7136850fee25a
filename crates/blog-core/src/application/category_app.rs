use std::sync::Arc;

use blog_shared::dto::{CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest};

use crate::domain::{Category, CategoryId};
use crate::error::DomainResult;
use crate::services::CategoryService;

#[derive(Clone)]
pub struct CategoryApp {
    category_service: Arc<CategoryService>,
}

impl CategoryApp {
    pub fn new(category_service: Arc<CategoryService>) -> Self {
        Self { category_service }
    }

    pub async fn create_category(
        &self,
        req: CreateCategoryRequest,
    ) -> DomainResult<CategoryResponse> {
        let category = self
            .category_service
            .create_category(req.name, req.description)
            .await?;

        Ok(category.into())
    }

    pub async fn get_category_by_id(&self, id: CategoryId) -> DomainResult<CategoryResponse> {
        let category = self.category_service.get_category_by_id(id).await?;
        Ok(category.into())
    }

    pub async fn get_all_categories(&self) -> DomainResult<Vec<CategoryResponse>> {
        let categories = self.category_service.get_all_categories().await?;
        Ok(categories.into_iter().map(Into::into).collect())
    }

    pub async fn update_category(
        &self,
        id: CategoryId,
        req: UpdateCategoryRequest,
    ) -> DomainResult<CategoryResponse> {
        let category = self
            .category_service
            .update_category(id, req.name, req.description)
            .await?;

        Ok(category.into())
    }

    pub async fn delete_category(&self, id: CategoryId) -> DomainResult<()> {
        Ok(self.category_service.delete_category(id).await?)
    }
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
        }
    }
}
