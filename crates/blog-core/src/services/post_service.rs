use std::sync::Arc;

use tracing::instrument;

use super::finish;
use crate::domain::{CategoryId, Post, PostId};
use crate::error::RepoResult;
use crate::ports::{CategoryRepository, PostRepository, TransactionScope, UnitOfWork};

/// Post use-cases.
///
/// Multi-step writes (creating a post together with its categories, the
/// load-mutate-persist update) run inside one [`TransactionScope`] and are
/// rolled back as a whole when any step fails.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    categories: Arc<dyn CategoryRepository>,
    uow: Arc<dyn UnitOfWork>,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        categories: Arc<dyn CategoryRepository>,
        uow: Arc<dyn UnitOfWork>,
    ) -> Self {
        Self {
            posts,
            categories,
            uow,
        }
    }

    #[instrument(skip(self, content))]
    pub async fn create_post(
        &self,
        title: String,
        content: String,
        author: String,
        title_url: Option<String>,
    ) -> RepoResult<Post> {
        let post = Post::new(title, content, author, title_url);
        let post = self.posts.create(post).await?;
        tracing::info!(post_id = post.id, "Post created");
        Ok(post)
    }

    /// Create a post and link it to every category in `category_ids`, in order.
    ///
    /// Either the post and all links are committed, or nothing is. The error
    /// of the first failing step is returned unchanged.
    #[instrument(skip(self, content))]
    pub async fn create_post_with_categories(
        &self,
        title: String,
        content: String,
        author: String,
        title_url: Option<String>,
        category_ids: Vec<CategoryId>,
    ) -> RepoResult<Post> {
        if category_ids.is_empty() {
            return self.create_post(title, content, author, title_url).await;
        }

        let tx = self.uow.begin().await?;
        let result = Self::write_post_with_categories(
            tx.as_ref(),
            Post::new(title, content, author, title_url),
            &category_ids,
        )
        .await;

        let post = finish(tx, result).await?;
        tracing::info!(
            post_id = post.id,
            categories = category_ids.len(),
            "Post created with categories"
        );
        Ok(post)
    }

    async fn write_post_with_categories(
        tx: &dyn TransactionScope,
        post: Post,
        category_ids: &[CategoryId],
    ) -> RepoResult<Post> {
        let post = tx.posts().create(post).await?;
        for &category_id in category_ids {
            tx.categories()
                .add_post_to_category(post.id, category_id)
                .await?;
        }
        Ok(post)
    }

    pub async fn get_post_by_id(&self, id: PostId) -> RepoResult<Post> {
        self.posts.find_by_id(id).await
    }

    pub async fn get_all_posts(&self) -> RepoResult<Vec<Post>> {
        self.posts.find_all().await
    }

    /// Load the post, replace title, content and title url, and persist it.
    ///
    /// The post is read under a row lock, so a view counted while the update
    /// is in flight is not overwritten by the stale count.
    #[instrument(skip(self, content))]
    pub async fn update_post(
        &self,
        id: PostId,
        title: String,
        content: String,
        title_url: Option<String>,
    ) -> RepoResult<Post> {
        let tx = self.uow.begin().await?;
        let result = async {
            let mut post = tx.posts().find_by_id_for_update(id).await?;
            post.update(title, content, title_url);
            tx.posts().update(post).await
        }
        .await;

        let post = finish(tx, result).await?;
        tracing::info!(post_id = post.id, "Post updated");
        Ok(post)
    }

    pub async fn increment_view_count(&self, id: PostId) -> RepoResult<()> {
        self.posts.increment_view_count(id).await
    }

    #[instrument(skip(self))]
    pub async fn delete_post(&self, id: PostId) -> RepoResult<()> {
        self.posts.delete(id).await?;
        tracing::info!(post_id = id, "Post deleted");
        Ok(())
    }

    pub async fn add_post_to_category(
        &self,
        post_id: PostId,
        category_id: CategoryId,
    ) -> RepoResult<()> {
        self.categories
            .add_post_to_category(post_id, category_id)
            .await
    }

    pub async fn remove_post_from_category(
        &self,
        post_id: PostId,
        category_id: CategoryId,
    ) -> RepoResult<()> {
        self.categories
            .remove_post_from_category(post_id, category_id)
            .await
    }

    pub async fn get_posts_by_category(&self, category_id: CategoryId) -> RepoResult<Vec<Post>> {
        self.posts.find_by_category(category_id).await
    }
}
