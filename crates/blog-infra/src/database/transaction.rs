//! Unit of work over SeaORM transactions.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{DatabaseTransaction, TransactionTrait};

use blog_core::error::{RepoError, RepoResult};
use blog_core::ports::{CategoryRepository, PostRepository, TransactionScope, UnitOfWork};

use super::error::map_db_err;
use super::seaorm_base::SharedConn;
use super::seaorm_repo::{SeaOrmCategoryRepository, SeaOrmPostRepository};

type SharedTransaction = Arc<DatabaseTransaction>;

/// Opens database transactions on the main pool.
#[derive(Clone)]
pub struct SeaOrmUnitOfWork {
    db: SharedConn,
}

impl SeaOrmUnitOfWork {
    pub fn new(db: SharedConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UnitOfWork for SeaOrmUnitOfWork {
    async fn begin(&self) -> RepoResult<Box<dyn TransactionScope>> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        tracing::debug!("Transaction started");
        Ok(Box::new(SeaOrmTransactionScope::new(txn)))
    }
}

/// Repositories sharing one open [`DatabaseTransaction`].
///
/// SeaORM rolls the transaction back when it is dropped uncommitted.
pub struct SeaOrmTransactionScope {
    txn: SharedTransaction,
    posts: SeaOrmPostRepository<SharedTransaction>,
    categories: SeaOrmCategoryRepository<SharedTransaction>,
}

impl SeaOrmTransactionScope {
    fn new(txn: DatabaseTransaction) -> Self {
        let txn = Arc::new(txn);
        Self {
            posts: SeaOrmPostRepository::new(txn.clone()),
            categories: SeaOrmCategoryRepository::new(txn.clone()),
            txn,
        }
    }

    /// Release the repositories and take back sole ownership of the transaction.
    fn into_transaction(self) -> RepoResult<DatabaseTransaction> {
        let Self {
            txn,
            posts,
            categories,
        } = self;
        drop(posts);
        drop(categories);

        Arc::try_unwrap(txn)
            .map_err(|_| RepoError::Query("transaction is still borrowed".to_string()))
    }
}

#[async_trait]
impl TransactionScope for SeaOrmTransactionScope {
    fn posts(&self) -> &dyn PostRepository {
        &self.posts
    }

    fn categories(&self) -> &dyn CategoryRepository {
        &self.categories
    }

    async fn commit(self: Box<Self>) -> RepoResult<()> {
        (*self)
            .into_transaction()?
            .commit()
            .await
            .map_err(map_db_err)?;

        tracing::debug!("Transaction committed");
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> RepoResult<()> {
        (*self)
            .into_transaction()?
            .rollback()
            .await
            .map_err(map_db_err)?;

        tracing::debug!("Transaction rolled back");
        Ok(())
    }
}
