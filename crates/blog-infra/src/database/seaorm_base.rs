use std::marker::PhantomData;
use std::sync::Arc;

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ConnectionTrait, DbConn, EntityTrait, IntoActiveModel,
    PrimaryKeyTrait,
};

use blog_core::error::{RepoError, RepoResult};

use super::error::map_db_err;

/// Something repositories can run statements against: the shared pool or an
/// open transaction shared by several repositories.
pub trait DbHandle: Send + Sync + 'static {
    type Conn: ConnectionTrait;

    fn conn(&self) -> &Self::Conn;
}

/// Shared pool handle. `DbConn` itself is not `Clone` once SeaORM's `mock`
/// feature is enabled, so repositories hold it behind an `Arc`.
pub type SharedConn = Arc<DbConn>;

impl<T> DbHandle for Arc<T>
where
    T: ConnectionTrait + Send + Sync + 'static,
{
    type Conn = T;

    fn conn(&self) -> &T {
        self
    }
}

/// Generic SeaORM repository over one entity.
///
/// `C` is the pool by default; transaction scopes build the same repository
/// over a shared [`DatabaseTransaction`].
pub struct SeaOrmRepository<E, C = SharedConn>
where
    E: EntityTrait,
{
    pub(crate) db: C,
    _entity: PhantomData<E>,
}

impl<E, C> SeaOrmRepository<E, C>
where
    E: EntityTrait,
    C: DbHandle,
{
    pub fn new(db: C) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    pub(crate) fn conn(&self) -> &C::Conn {
        self.db.conn()
    }

    /// Load one row by primary key, mapping a miss to `RepoError::NotFound`.
    pub(crate) async fn fetch_by_id<T>(&self, id: i32, entity: &'static str) -> RepoResult<T>
    where
        E::PrimaryKey: PrimaryKeyTrait<ValueType = i32>,
        T: From<E::Model>,
    {
        let result = E::find_by_id(id)
            .one(self.conn())
            .await
            .map_err(map_db_err)?;

        result
            .map(Into::into)
            .ok_or(RepoError::not_found(entity, id))
    }

    /// Insert a new row and return it with its generated id.
    pub(crate) async fn insert<T>(&self, entity: T) -> RepoResult<T>
    where
        T: Into<E::ActiveModel> + From<E::Model>,
        E::Model: IntoActiveModel<E::ActiveModel>,
        E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    {
        let active_model: E::ActiveModel = entity.into();
        let model = active_model
            .insert(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    /// Delete one row by primary key, returning how many rows went away.
    pub(crate) async fn delete_by_id(&self, id: i32) -> RepoResult<u64>
    where
        E::PrimaryKey: PrimaryKeyTrait<ValueType = i32>,
    {
        let result = E::delete_by_id(id)
            .exec(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected)
    }
}
