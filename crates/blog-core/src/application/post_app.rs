use std::sync::Arc;

use blog_shared::dto::{CreatePostRequest, PostDetailResponse, PostResponse, UpdatePostRequest};

use crate::domain::{CategoryId, Post, PostId};
use crate::error::DomainResult;
use crate::services::{CategoryService, PostService};

/// Post application service: request DTOs in, response DTOs out.
#[derive(Clone)]
pub struct PostApp {
    post_service: Arc<PostService>,
    category_service: Arc<CategoryService>,
}

impl PostApp {
    pub fn new(post_service: Arc<PostService>, category_service: Arc<CategoryService>) -> Self {
        Self {
            post_service,
            category_service,
        }
    }

    /// Create a post and file it under `req.category_ids` as one unit.
    pub async fn create_post(&self, req: CreatePostRequest) -> DomainResult<PostResponse> {
        let post = self
            .post_service
            .create_post_with_categories(
                req.title,
                req.content,
                req.author,
                req.title_url,
                req.category_ids,
            )
            .await?;

        Ok(post.into())
    }

    /// The post with its categories attached.
    pub async fn get_post_by_id(&self, id: PostId) -> DomainResult<PostDetailResponse> {
        let post = self.post_service.get_post_by_id(id).await?;
        let categories = self.category_service.get_categories_by_post_id(id).await?;

        Ok(PostDetailResponse {
            id: post.id,
            title: post.title,
            content: post.content,
            author: post.author,
            title_url: post.title_url,
            view_count: post.view_count,
            created_at: post.created_at,
            updated_at: post.updated_at,
            categories: categories.into_iter().map(Into::into).collect(),
        })
    }

    pub async fn get_all_posts(&self) -> DomainResult<Vec<PostResponse>> {
        let posts = self.post_service.get_all_posts().await?;
        Ok(posts.into_iter().map(Into::into).collect())
    }

    pub async fn update_post(
        &self,
        id: PostId,
        req: UpdatePostRequest,
    ) -> DomainResult<PostResponse> {
        let post = self
            .post_service
            .update_post(id, req.title, req.content, req.title_url)
            .await?;

        Ok(post.into())
    }

    pub async fn increment_view_count(&self, id: PostId) -> DomainResult<()> {
        Ok(self.post_service.increment_view_count(id).await?)
    }

    pub async fn delete_post(&self, id: PostId) -> DomainResult<()> {
        Ok(self.post_service.delete_post(id).await?)
    }

    pub async fn get_posts_by_category(
        &self,
        category_id: CategoryId,
    ) -> DomainResult<Vec<PostResponse>> {
        let posts = self.post_service.get_posts_by_category(category_id).await?;
        Ok(posts.into_iter().map(Into::into).collect())
    }

    pub async fn add_post_to_category(
        &self,
        post_id: PostId,
        category_id: CategoryId,
    ) -> DomainResult<()> {
        Ok(self
            .post_service
            .add_post_to_category(post_id, category_id)
            .await?)
    }

    pub async fn remove_post_from_category(
        &self,
        post_id: PostId,
        category_id: CategoryId,
    ) -> DomainResult<()> {
        Ok(self
            .post_service
            .remove_post_from_category(post_id, category_id)
            .await?)
    }
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            author: post.author,
            title_url: post.title_url,
            view_count: post.view_count,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_response_drops_content() {
        let mut post = Post::new("A".into(), "B".into(), "C".into(), Some("a".into()));
        post.id = 1;
        post.view_count = 2;

        let response = PostResponse::from(post.clone());

        assert_eq!(response.id, 1);
        assert_eq!(response.title, "A");
        assert_eq!(response.author, "C");
        assert_eq!(response.title_url.as_deref(), Some("a"));
        assert_eq!(response.view_count, 2);
        assert_eq!(response.created_at, post.created_at);
    }
}
