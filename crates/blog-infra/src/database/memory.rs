//! In-memory blog store - used when no `DATABASE_URL` is configured.
//!
//! Emulates the relational schema: generated ids, the unique category name,
//! the unique (post, category) pair, foreign keys and cascading deletes.
//! Note: Data is lost on process restart.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, OwnedRwLockWriteGuard, RwLock};

use blog_core::domain::{Category, CategoryId, Comment, CommentId, Post, PostCategory, PostId};
use blog_core::error::{RepoError, RepoResult};
use blog_core::ports::{
    BaseRepository, CategoryRepository, CommentRepository, PostRepository, TransactionScope,
    UnitOfWork,
};

/// Tables are reference counted so a transaction snapshot only shares them.
/// Writers go through `Arc::make_mut`, which copies a table only while a
/// snapshot still holds it.
#[derive(Debug, Clone, Default)]
struct MemoryState {
    posts: Arc<BTreeMap<PostId, Post>>,
    comments: Arc<BTreeMap<CommentId, Comment>>,
    categories: Arc<BTreeMap<CategoryId, Category>>,
    links: Arc<Vec<PostCategory>>,
    last_post_id: PostId,
    last_comment_id: CommentId,
    last_category_id: CategoryId,
    last_link_id: i32,
}

fn newest_first<T>(items: &mut [T], key: impl Fn(&T) -> (chrono::DateTime<Utc>, i32)) {
    items.sort_by_key(|item| std::cmp::Reverse(key(item)));
}

impl MemoryState {
    fn post(&self, id: PostId) -> RepoResult<Post> {
        self.posts
            .get(&id)
            .cloned()
            .ok_or(RepoError::not_found("post", id))
    }

    fn insert_post(&mut self, mut post: Post) -> Post {
        self.last_post_id += 1;
        post.id = self.last_post_id;
        Arc::make_mut(&mut self.posts).insert(post.id, post.clone());
        post
    }

    fn update_post(&mut self, post: Post) -> RepoResult<Post> {
        let stored = Arc::make_mut(&mut self.posts)
            .get_mut(&post.id)
            .ok_or(RepoError::not_found("post", post.id))?;

        stored.title = post.title;
        stored.content = post.content;
        stored.title_url = post.title_url;
        stored.view_count = post.view_count;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    fn increment_view_count(&mut self, id: PostId) -> RepoResult<()> {
        let stored = Arc::make_mut(&mut self.posts)
            .get_mut(&id)
            .ok_or(RepoError::not_found("post", id))?;

        stored.view_count += 1;
        stored.updated_at = Utc::now();
        Ok(())
    }

    fn delete_post(&mut self, id: PostId) -> RepoResult<()> {
        Arc::make_mut(&mut self.posts)
            .remove(&id)
            .ok_or(RepoError::not_found("post", id))?;

        Arc::make_mut(&mut self.comments).retain(|_, comment| comment.post_id != id);
        Arc::make_mut(&mut self.links).retain(|link| link.post_id != id);
        Ok(())
    }

    fn all_posts(&self) -> Vec<Post> {
        let mut posts: Vec<Post> = self.posts.values().cloned().collect();
        newest_first(&mut posts, |p| (p.created_at, p.id));
        posts
    }

    fn posts_by_category(&self, category_id: CategoryId) -> Vec<Post> {
        let mut posts: Vec<Post> = self
            .links
            .iter()
            .filter(|link| link.category_id == category_id)
            .filter_map(|link| self.posts.get(&link.post_id).cloned())
            .collect();
        newest_first(&mut posts, |p| (p.created_at, p.id));
        posts
    }

    fn insert_comment(&mut self, mut comment: Comment) -> RepoResult<Comment> {
        if !self.posts.contains_key(&comment.post_id) {
            return Err(RepoError::Constraint(format!(
                "comment references missing post {}",
                comment.post_id
            )));
        }

        self.last_comment_id += 1;
        comment.id = self.last_comment_id;
        Arc::make_mut(&mut self.comments).insert(comment.id, comment.clone());
        Ok(comment)
    }

    fn comments_for_post(&self, post_id: PostId) -> Vec<Comment> {
        let mut comments: Vec<Comment> = self
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        newest_first(&mut comments, |c| (c.created_at, c.id));
        comments
    }

    fn ensure_unique_name(&self, name: &str, except: Option<CategoryId>) -> RepoResult<()> {
        let taken = self
            .categories
            .values()
            .any(|c| c.name == name && Some(c.id) != except);

        if taken {
            return Err(RepoError::Constraint(format!(
                "category name '{name}' already exists"
            )));
        }
        Ok(())
    }

    fn insert_category(&mut self, mut category: Category) -> RepoResult<Category> {
        self.ensure_unique_name(&category.name, None)?;

        self.last_category_id += 1;
        category.id = self.last_category_id;
        Arc::make_mut(&mut self.categories).insert(category.id, category.clone());
        Ok(category)
    }

    fn update_category(&mut self, category: Category) -> RepoResult<Category> {
        if !self.categories.contains_key(&category.id) {
            return Err(RepoError::not_found("category", category.id));
        }
        self.ensure_unique_name(&category.name, Some(category.id))?;

        Arc::make_mut(&mut self.categories).insert(category.id, category.clone());
        Ok(category)
    }

    fn delete_category(&mut self, id: CategoryId) -> RepoResult<()> {
        Arc::make_mut(&mut self.categories)
            .remove(&id)
            .ok_or(RepoError::not_found("category", id))?;

        Arc::make_mut(&mut self.links).retain(|link| link.category_id != id);
        Ok(())
    }

    fn all_categories(&self) -> Vec<Category> {
        let mut categories: Vec<Category> = self.categories.values().cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        categories
    }

    fn link(&mut self, post_id: PostId, category_id: CategoryId) -> RepoResult<()> {
        if !self.posts.contains_key(&post_id) || !self.categories.contains_key(&category_id) {
            return Err(RepoError::Constraint(format!(
                "link references missing post {post_id} or category {category_id}"
            )));
        }

        let duplicate = self
            .links
            .iter()
            .any(|link| link.post_id == post_id && link.category_id == category_id);
        if duplicate {
            return Err(RepoError::Constraint(format!(
                "post {post_id} is already in category {category_id}"
            )));
        }

        self.last_link_id += 1;
        let mut link = PostCategory::new(post_id, category_id);
        link.id = self.last_link_id;
        Arc::make_mut(&mut self.links).push(link);
        Ok(())
    }

    fn unlink(&mut self, post_id: PostId, category_id: CategoryId) {
        Arc::make_mut(&mut self.links)
            .retain(|link| !(link.post_id == post_id && link.category_id == category_id));
    }

    fn categories_for_post(&self, post_id: PostId) -> Vec<Category> {
        let mut categories: Vec<Category> = self
            .links
            .iter()
            .filter(|link| link.post_id == post_id)
            .filter_map(|link| self.categories.get(&link.category_id).cloned())
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        categories
    }
}

type ScopedState = Arc<Mutex<OwnedRwLockWriteGuard<MemoryState>>>;

/// Where a repository reads and writes: the shared store, or the state held
/// exclusively by an open transaction.
#[derive(Clone)]
enum StateHandle {
    Shared(Arc<RwLock<MemoryState>>),
    Scoped(ScopedState),
}

impl StateHandle {
    async fn read<R>(&self, f: impl FnOnce(&MemoryState) -> R + Send) -> R {
        match self {
            Self::Shared(lock) => f(&*lock.read().await),
            Self::Scoped(scope) => f(&**scope.lock().await),
        }
    }

    async fn write<R>(&self, f: impl FnOnce(&mut MemoryState) -> R + Send) -> R {
        match self {
            Self::Shared(lock) => f(&mut *lock.write().await),
            Self::Scoped(scope) => f(&mut **scope.lock().await),
        }
    }
}

/// In-memory store handing out repositories over one shared state.
#[derive(Clone, Default)]
pub struct InMemoryBlogStore {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryBlogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn posts(&self) -> InMemoryPostRepository {
        InMemoryPostRepository {
            state: StateHandle::Shared(self.state.clone()),
        }
    }

    pub fn comments(&self) -> InMemoryCommentRepository {
        InMemoryCommentRepository {
            state: StateHandle::Shared(self.state.clone()),
        }
    }

    pub fn categories(&self) -> InMemoryCategoryRepository {
        InMemoryCategoryRepository {
            state: StateHandle::Shared(self.state.clone()),
        }
    }

    pub fn unit_of_work(&self) -> InMemoryUnitOfWork {
        InMemoryUnitOfWork {
            state: self.state.clone(),
        }
    }
}

/// In-memory post repository.
#[derive(Clone)]
pub struct InMemoryPostRepository {
    state: StateHandle,
}

#[async_trait]
impl BaseRepository<Post, PostId> for InMemoryPostRepository {
    async fn create(&self, post: Post) -> RepoResult<Post> {
        Ok(self.state.write(|s| s.insert_post(post)).await)
    }

    async fn find_by_id(&self, id: PostId) -> RepoResult<Post> {
        self.state.read(|s| s.post(id)).await
    }

    async fn delete(&self, id: PostId) -> RepoResult<()> {
        self.state.write(|s| s.delete_post(id)).await
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_all(&self) -> RepoResult<Vec<Post>> {
        Ok(self.state.read(MemoryState::all_posts).await)
    }

    /// Transactions already hold the whole store exclusively.
    async fn find_by_id_for_update(&self, id: PostId) -> RepoResult<Post> {
        self.state.read(|s| s.post(id)).await
    }

    async fn update(&self, post: Post) -> RepoResult<Post> {
        self.state.write(|s| s.update_post(post)).await
    }

    async fn find_by_category(&self, category_id: CategoryId) -> RepoResult<Vec<Post>> {
        Ok(self.state.read(|s| s.posts_by_category(category_id)).await)
    }

    async fn increment_view_count(&self, id: PostId) -> RepoResult<()> {
        self.state.write(|s| s.increment_view_count(id)).await
    }
}

/// In-memory comment repository.
#[derive(Clone)]
pub struct InMemoryCommentRepository {
    state: StateHandle,
}

#[async_trait]
impl BaseRepository<Comment, CommentId> for InMemoryCommentRepository {
    async fn create(&self, comment: Comment) -> RepoResult<Comment> {
        self.state.write(|s| s.insert_comment(comment)).await
    }

    async fn find_by_id(&self, id: CommentId) -> RepoResult<Comment> {
        self.state
            .read(|s| s.comments.get(&id).cloned())
            .await
            .ok_or(RepoError::not_found("comment", id))
    }

    async fn delete(&self, id: CommentId) -> RepoResult<()> {
        self.state
            .write(|s| {
                Arc::make_mut(&mut s.comments).remove(&id);
            })
            .await;
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn find_by_post_id(&self, post_id: PostId) -> RepoResult<Vec<Comment>> {
        Ok(self.state.read(|s| s.comments_for_post(post_id)).await)
    }
}

/// In-memory category repository, including post/category links.
#[derive(Clone)]
pub struct InMemoryCategoryRepository {
    state: StateHandle,
}

#[async_trait]
impl BaseRepository<Category, CategoryId> for InMemoryCategoryRepository {
    async fn create(&self, category: Category) -> RepoResult<Category> {
        self.state.write(|s| s.insert_category(category)).await
    }

    async fn find_by_id(&self, id: CategoryId) -> RepoResult<Category> {
        self.state
            .read(|s| s.categories.get(&id).cloned())
            .await
            .ok_or(RepoError::not_found("category", id))
    }

    async fn delete(&self, id: CategoryId) -> RepoResult<()> {
        self.state.write(|s| s.delete_category(id)).await
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find_all(&self) -> RepoResult<Vec<Category>> {
        Ok(self.state.read(MemoryState::all_categories).await)
    }

    async fn update(&self, category: Category) -> RepoResult<Category> {
        self.state.write(|s| s.update_category(category)).await
    }

    async fn add_post_to_category(
        &self,
        post_id: PostId,
        category_id: CategoryId,
    ) -> RepoResult<()> {
        self.state.write(|s| s.link(post_id, category_id)).await
    }

    async fn remove_post_from_category(
        &self,
        post_id: PostId,
        category_id: CategoryId,
    ) -> RepoResult<()> {
        self.state.write(|s| s.unlink(post_id, category_id)).await;
        Ok(())
    }

    async fn find_by_post_id(&self, post_id: PostId) -> RepoResult<Vec<Category>> {
        Ok(self.state.read(|s| s.categories_for_post(post_id)).await)
    }
}

/// Opens in-memory transactions.
///
/// A transaction holds the store's write lock until it ends, so transactions
/// and plain repository calls are serialized. Its rollback snapshot shares
/// the tables; a table is copied the first time the transaction writes to it.
#[derive(Clone)]
pub struct InMemoryUnitOfWork {
    state: Arc<RwLock<MemoryState>>,
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    async fn begin(&self) -> RepoResult<Box<dyn TransactionScope>> {
        let guard = self.state.clone().write_owned().await;
        let snapshot = guard.clone();
        let scoped: ScopedState = Arc::new(Mutex::new(guard));

        Ok(Box::new(InMemoryTransactionScope {
            posts: InMemoryPostRepository {
                state: StateHandle::Scoped(scoped.clone()),
            },
            categories: InMemoryCategoryRepository {
                state: StateHandle::Scoped(scoped.clone()),
            },
            state: scoped,
            snapshot: Some(snapshot),
        }))
    }
}

struct InMemoryTransactionScope {
    state: ScopedState,
    posts: InMemoryPostRepository,
    categories: InMemoryCategoryRepository,
    /// State as it was at `begin`; `None` once committed or rolled back.
    snapshot: Option<MemoryState>,
}

#[async_trait]
impl TransactionScope for InMemoryTransactionScope {
    fn posts(&self) -> &dyn PostRepository {
        &self.posts
    }

    fn categories(&self) -> &dyn CategoryRepository {
        &self.categories
    }

    async fn commit(self: Box<Self>) -> RepoResult<()> {
        let mut scope = self;
        scope.snapshot = None;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> RepoResult<()> {
        let mut scope = self;
        if let Some(snapshot) = scope.snapshot.take() {
            **scope.state.lock().await = snapshot;
        }
        Ok(())
    }
}

impl Drop for InMemoryTransactionScope {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            match self.state.try_lock() {
                Ok(mut guard) => **guard = snapshot,
                Err(_) => tracing::error!("In-memory transaction dropped while in use"),
            }
        }
    }
}
