//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - SeaORM repositories and transactions
//! - `minimal` - No database driver, in-memory store only

pub mod database;

// Re-exports - In-Memory
pub use database::{DatabaseConfig, InMemoryBlogStore};

// Re-exports - SeaORM
#[cfg(feature = "postgres")]
pub use database::{DatabasePool, SeaOrmUnitOfWork};
