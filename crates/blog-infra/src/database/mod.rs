//! Database connection management and repository implementations.

mod connections;
mod memory;

#[cfg(feature = "postgres")]
mod error;
#[cfg(feature = "postgres")]
mod seaorm_base;
#[cfg(feature = "postgres")]
pub mod seaorm_repo;
#[cfg(feature = "postgres")]
mod transaction;

#[cfg(feature = "postgres")]
pub mod entity;

pub use connections::DatabaseConfig;
pub use memory::{
    InMemoryBlogStore, InMemoryCategoryRepository, InMemoryCommentRepository,
    InMemoryPostRepository, InMemoryUnitOfWork,
};

#[cfg(feature = "postgres")]
pub use connections::DatabasePool;
#[cfg(feature = "postgres")]
pub use seaorm_base::{DbHandle, SeaOrmRepository};
#[cfg(feature = "postgres")]
pub use seaorm_repo::{SeaOrmCategoryRepository, SeaOrmCommentRepository, SeaOrmPostRepository};
#[cfg(feature = "postgres")]
pub use transaction::{SeaOrmTransactionScope, SeaOrmUnitOfWork};

#[cfg(feature = "postgres")]
#[cfg(test)]
mod tests;
