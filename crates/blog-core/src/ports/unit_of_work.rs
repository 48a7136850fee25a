use async_trait::async_trait;

use super::{CategoryRepository, PostRepository};
use crate::error::RepoResult;

/// Storage that can group several repository writes into one atomic unit.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Open a transaction. Nothing written through the returned scope is
    /// visible to other callers until [`TransactionScope::commit`].
    async fn begin(&self) -> RepoResult<Box<dyn TransactionScope>>;
}

/// Repositories bound to one open transaction.
///
/// Dropping a scope without committing rolls it back.
#[async_trait]
pub trait TransactionScope: Send + Sync {
    fn posts(&self) -> &dyn PostRepository;

    fn categories(&self) -> &dyn CategoryRepository;

    async fn commit(self: Box<Self>) -> RepoResult<()>;

    async fn rollback(self: Box<Self>) -> RepoResult<()>;
}
