//! Domain services - cross-entity invariants and repository orchestration.

mod category_service;
mod comment_service;
mod post_service;

pub use category_service::CategoryService;
pub use comment_service::CommentService;
pub use post_service::PostService;

use crate::error::RepoResult;
use crate::ports::TransactionScope;

/// Commit `tx` when `result` is a success, roll it back otherwise.
///
/// On failure the caller gets the error of the step that failed, not the
/// rollback outcome.
async fn finish<T>(tx: Box<dyn TransactionScope>, result: RepoResult<T>) -> RepoResult<T> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            tracing::warn!(error = %err, "Rolling back transaction");
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(error = %rollback_err, "Transaction rollback failed");
            }
            Err(err)
        }
    }
}
