//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::application::{CategoryApp, CommentApp, PostApp};
use blog_core::ports::{CategoryRepository, CommentRepository, PostRepository, UnitOfWork};
use blog_core::services::{CategoryService, CommentService, PostService};
use blog_infra::InMemoryBlogStore;

#[cfg(feature = "postgres")]
use blog_infra::DatabasePool;

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostApp,
    pub comments: CommentApp,
    pub categories: CategoryApp,
    /// Backend name reported by the health check.
    pub storage: &'static str,
    #[cfg(feature = "postgres")]
    pub db: Option<DatabasePool>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> std::io::Result<Self> {
        #[cfg(feature = "postgres")]
        {
            if let Some(db_config) = &config.database {
                match DatabasePool::connect(db_config).await {
                    Ok(pool) => {
                        if config.run_migrations {
                            run_migrations(&pool).await?;
                        }
                        return Ok(Self::with_database(pool));
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            }
        }

        #[cfg(not(feature = "postgres"))]
        {
            let _ = config;
            tracing::info!("Running without postgres feature - using in-memory store");
        }

        Ok(Self::in_memory(&InMemoryBlogStore::new()))
    }

    /// State backed by the in-memory store.
    pub fn in_memory(store: &InMemoryBlogStore) -> Self {
        Self::wire(
            Arc::new(store.posts()),
            Arc::new(store.comments()),
            Arc::new(store.categories()),
            Arc::new(store.unit_of_work()),
            "memory",
        )
    }

    #[cfg(feature = "postgres")]
    fn with_database(pool: DatabasePool) -> Self {
        let state = Self::wire(
            Arc::new(pool.post_repository()),
            Arc::new(pool.comment_repository()),
            Arc::new(pool.category_repository()),
            Arc::new(pool.unit_of_work()),
            "database",
        );

        Self {
            db: Some(pool),
            ..state
        }
    }

    fn wire(
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
        categories: Arc<dyn CategoryRepository>,
        uow: Arc<dyn UnitOfWork>,
        storage: &'static str,
    ) -> Self {
        let post_service = Arc::new(PostService::new(
            posts.clone(),
            categories.clone(),
            uow.clone(),
        ));
        let comment_service = Arc::new(CommentService::new(comments, posts));
        let category_service = Arc::new(CategoryService::new(categories, uow));

        tracing::info!(storage, "Application state initialized");

        Self {
            posts: PostApp::new(post_service, category_service.clone()),
            comments: CommentApp::new(comment_service),
            categories: CategoryApp::new(category_service),
            storage,
            #[cfg(feature = "postgres")]
            db: None,
        }
    }
}

#[cfg(feature = "postgres")]
async fn run_migrations(pool: &DatabasePool) -> std::io::Result<()> {
    use migration::{Migrator, MigratorTrait};

    Migrator::up(pool.conn(), None).await.map_err(|e| {
        tracing::error!("Failed to run migrations: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    tracing::info!("Database migrations applied");
    Ok(())
}
