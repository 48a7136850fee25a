#[cfg(feature = "postgres")]
use std::sync::Arc;
#[cfg(feature = "postgres")]
use std::time::Duration;

#[cfg(feature = "postgres")]
use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

#[cfg(feature = "postgres")]
use super::seaorm_base::SharedConn;
#[cfg(feature = "postgres")]
use super::seaorm_repo::{SeaOrmCategoryRepository, SeaOrmCommentRepository, SeaOrmPostRepository};
#[cfg(feature = "postgres")]
use super::transaction::SeaOrmUnitOfWork;

/// Configuration for the blog database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Connection pool for the blog database.
///
/// Hands out repositories and a unit of work bound to the same pool.
///
/// # Example
/// ```ignore
/// let pool = DatabasePool::connect(&config).await?;
/// let posts = pool.post_repository();
/// let post = posts.find_by_id(1).await?;
/// ```
#[cfg(feature = "postgres")]
#[derive(Clone)]
pub struct DatabasePool {
    conn: SharedConn,
}

#[cfg(feature = "postgres")]
impl DatabasePool {
    /// Open the pool described by `config`.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!("Initializing database connection...");

        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(true)
            .to_owned();

        let conn = Database::connect(opts).await?;
        tracing::info!("Database connected (pool: {})", config.max_connections);

        Ok(Self {
            conn: Arc::new(conn),
        })
    }

    pub fn conn(&self) -> &DbConn {
        &self.conn
    }

    pub fn post_repository(&self) -> SeaOrmPostRepository {
        SeaOrmPostRepository::new(self.conn.clone())
    }

    pub fn comment_repository(&self) -> SeaOrmCommentRepository {
        SeaOrmCommentRepository::new(self.conn.clone())
    }

    pub fn category_repository(&self) -> SeaOrmCategoryRepository {
        SeaOrmCategoryRepository::new(self.conn.clone())
    }

    pub fn unit_of_work(&self) -> SeaOrmUnitOfWork {
        SeaOrmUnitOfWork::new(self.conn.clone())
    }

    /// Close every connection in the pool.
    ///
    /// Repositories still holding the pool see `ConnectionAcquire` errors
    /// afterwards.
    pub async fn close(self) -> Result<(), DbErr> {
        self.conn.close_by_ref().await?;
        tracing::info!("Database connection closed");
        Ok(())
    }
}
