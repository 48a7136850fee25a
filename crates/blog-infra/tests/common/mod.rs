#![allow(dead_code)]

use std::sync::Arc;

use blog_core::services::{CategoryService, CommentService, PostService};
use blog_infra::{DatabaseConfig, DatabasePool, InMemoryBlogStore};
use migration::{Migrator, MigratorTrait};

/// Fresh SQLite database in memory with the blog schema applied.
///
/// A single connection keeps every statement on the same in-memory database.
pub async fn sqlite_pool() -> DatabasePool {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
    };

    let pool = DatabasePool::connect(&config).await.unwrap();
    Migrator::up(pool.conn(), None).await.unwrap();
    pool
}

pub struct Services {
    pub posts: PostService,
    pub comments: CommentService,
    pub categories: CategoryService,
}

pub fn sqlite_services(pool: &DatabasePool) -> Services {
    let posts = Arc::new(pool.post_repository());
    let comments = Arc::new(pool.comment_repository());
    let categories = Arc::new(pool.category_repository());
    let uow = Arc::new(pool.unit_of_work());

    Services {
        posts: PostService::new(posts.clone(), categories.clone(), uow.clone()),
        comments: CommentService::new(comments, posts),
        categories: CategoryService::new(categories, uow),
    }
}

pub fn memory_services(store: &InMemoryBlogStore) -> Services {
    let posts = Arc::new(store.posts());
    let comments = Arc::new(store.comments());
    let categories = Arc::new(store.categories());
    let uow = Arc::new(store.unit_of_work());

    Services {
        posts: PostService::new(posts.clone(), categories.clone(), uow.clone()),
        comments: CommentService::new(comments, posts),
        categories: CategoryService::new(categories, uow),
    }
}
