use async_trait::async_trait;

use crate::domain::{Category, CategoryId, Comment, CommentId, Post, PostId};
use crate::error::RepoResult;

/// Generic repository trait defining the operations every entity family shares.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Persist a new entity. The returned copy carries the storage-assigned id.
    async fn create(&self, entity: T) -> RepoResult<T>;

    /// Find an entity by its id, failing with `RepoError::NotFound` when absent.
    async fn find_by_id(&self, id: ID) -> RepoResult<T>;

    /// Delete an entity by its id.
    async fn delete(&self, id: ID) -> RepoResult<()>;
}

/// Post repository.
///
/// Deleting a post cascades to its comments and category associations.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, PostId> {
    /// All posts, most recently created first.
    async fn find_all(&self) -> RepoResult<Vec<Post>>;

    /// Like `find_by_id`, but the row stays locked against other writers,
    /// atomic view-count increments included, until the surrounding
    /// transaction ends. Outside a transaction the lock is released at once.
    async fn find_by_id_for_update(&self, id: PostId) -> RepoResult<Post>;

    /// Persist title, content, title url and view count.
    ///
    /// `updated_at` is always refreshed to the current time, whatever the
    /// caller put in it. Fails with `NotFound` if the row is gone.
    async fn update(&self, post: Post) -> RepoResult<Post>;

    /// Posts linked to `category_id`, most recently created first.
    async fn find_by_category(&self, category_id: CategoryId) -> RepoResult<Vec<Post>>;

    /// Add exactly one to the view count in a single statement.
    async fn increment_view_count(&self, id: PostId) -> RepoResult<()>;
}

/// Comment repository. Comments are never updated.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, CommentId> {
    /// Comments on `post_id`, newest first.
    async fn find_by_post_id(&self, post_id: PostId) -> RepoResult<Vec<Comment>>;
}

/// Category repository, also owning the post/category association table.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, CategoryId> {
    /// All categories ordered by name.
    async fn find_all(&self) -> RepoResult<Vec<Category>>;

    async fn update(&self, category: Category) -> RepoResult<Category>;

    /// Link a post to a category.
    ///
    /// A second link for the same pair fails with `RepoError::Constraint`;
    /// the storage unique index is the only de-duplication.
    async fn add_post_to_category(&self, post_id: PostId, category_id: CategoryId)
    -> RepoResult<()>;

    /// Unlink a post from a category. Missing links are ignored.
    async fn remove_post_from_category(
        &self,
        post_id: PostId,
        category_id: CategoryId,
    ) -> RepoResult<()>;

    /// Categories linked to `post_id`, ordered by name.
    async fn find_by_post_id(&self, post_id: PostId) -> RepoResult<Vec<Category>>;
}
