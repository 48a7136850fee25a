//! SeaORM repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, JoinType, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set, Unchanged,
};

use blog_core::domain::{Category, CategoryId, Comment, CommentId, Post, PostCategory, PostId};
use blog_core::error::{RepoError, RepoResult};
use blog_core::ports::{BaseRepository, CategoryRepository, CommentRepository, PostRepository};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_category::{self, Entity as PostCategoryEntity};
use super::error::map_db_err;
use super::seaorm_base::{DbHandle, SeaOrmRepository, SharedConn};

/// SeaORM post repository.
pub type SeaOrmPostRepository<C = SharedConn> = SeaOrmRepository<PostEntity, C>;

/// SeaORM comment repository.
pub type SeaOrmCommentRepository<C = SharedConn> = SeaOrmRepository<CommentEntity, C>;

/// SeaORM category repository, including the `post_categories` table.
pub type SeaOrmCategoryRepository<C = SharedConn> = SeaOrmRepository<CategoryEntity, C>;

#[async_trait]
impl<C: DbHandle> BaseRepository<Post, PostId> for SeaOrmPostRepository<C> {
    async fn create(&self, post: Post) -> RepoResult<Post> {
        self.insert(post).await
    }

    async fn find_by_id(&self, id: PostId) -> RepoResult<Post> {
        tracing::debug!(post_id = id, "Finding post by id");
        self.fetch_by_id(id, "post").await
    }

    async fn delete(&self, id: PostId) -> RepoResult<()> {
        if self.delete_by_id(id).await? == 0 {
            return Err(RepoError::not_found("post", id));
        }
        Ok(())
    }
}

#[async_trait]
impl<C: DbHandle> PostRepository for SeaOrmPostRepository<C> {
    async fn find_all(&self) -> RepoResult<Vec<Post>> {
        let result = PostEntity::find()
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .all(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_id_for_update(&self, id: PostId) -> RepoResult<Post> {
        // SQLite has no row locks; its write transactions are already exclusive
        let result = PostEntity::find_by_id(id)
            .lock_exclusive()
            .one(self.conn())
            .await
            .map_err(map_db_err)?;

        result
            .map(Into::into)
            .ok_or(RepoError::not_found("post", id))
    }

    async fn update(&self, post: Post) -> RepoResult<Post> {
        let id = post.id;
        let active_model = post::ActiveModel {
            id: Unchanged(id),
            title: Set(post.title),
            content: Set(post.content),
            title_url: Set(post.title_url),
            view_count: Set(post.view_count),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };

        match active_model.update(self.conn()).await {
            Ok(model) => Ok(model.into()),
            Err(DbErr::RecordNotUpdated) => Err(RepoError::not_found("post", id)),
            Err(e) => Err(map_db_err(e)),
        }
    }

    async fn find_by_category(&self, category_id: CategoryId) -> RepoResult<Vec<Post>> {
        let result = PostEntity::find()
            .join(JoinType::InnerJoin, post::Relation::PostCategory.def())
            .filter(post_category::Column::CategoryId.eq(category_id))
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .all(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn increment_view_count(&self, id: PostId) -> RepoResult<()> {
        let now: DateTimeWithTimeZone = Utc::now().into();

        let result = PostEntity::update_many()
            .col_expr(
                post::Column::ViewCount,
                Expr::col(post::Column::ViewCount).add(1),
            )
            .col_expr(post::Column::UpdatedAt, Expr::value(now))
            .filter(post::Column::Id.eq(id))
            .exec(self.conn())
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::not_found("post", id));
        }
        Ok(())
    }
}

#[async_trait]
impl<C: DbHandle> BaseRepository<Comment, CommentId> for SeaOrmCommentRepository<C> {
    async fn create(&self, comment: Comment) -> RepoResult<Comment> {
        self.insert(comment).await
    }

    async fn find_by_id(&self, id: CommentId) -> RepoResult<Comment> {
        self.fetch_by_id(id, "comment").await
    }

    /// Deleting a comment that does not exist is not an error.
    async fn delete(&self, id: CommentId) -> RepoResult<()> {
        self.delete_by_id(id).await?;
        Ok(())
    }
}

#[async_trait]
impl<C: DbHandle> CommentRepository for SeaOrmCommentRepository<C> {
    async fn find_by_post_id(&self, post_id: PostId) -> RepoResult<Vec<Comment>> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_desc(comment::Column::CreatedAt)
            .order_by_desc(comment::Column::Id)
            .all(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl<C: DbHandle> BaseRepository<Category, CategoryId> for SeaOrmCategoryRepository<C> {
    async fn create(&self, category: Category) -> RepoResult<Category> {
        self.insert(category).await
    }

    async fn find_by_id(&self, id: CategoryId) -> RepoResult<Category> {
        self.fetch_by_id(id, "category").await
    }

    async fn delete(&self, id: CategoryId) -> RepoResult<()> {
        if self.delete_by_id(id).await? == 0 {
            return Err(RepoError::not_found("category", id));
        }
        Ok(())
    }
}

#[async_trait]
impl<C: DbHandle> CategoryRepository for SeaOrmCategoryRepository<C> {
    async fn find_all(&self) -> RepoResult<Vec<Category>> {
        let result = CategoryEntity::find()
            .order_by_asc(category::Column::Name)
            .all(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn update(&self, category: Category) -> RepoResult<Category> {
        let id = category.id;
        let active_model = category::ActiveModel {
            id: Unchanged(id),
            name: Set(category.name),
            description: Set(category.description),
        };

        match active_model.update(self.conn()).await {
            Ok(model) => Ok(model.into()),
            Err(DbErr::RecordNotUpdated) => Err(RepoError::not_found("category", id)),
            Err(e) => Err(map_db_err(e)),
        }
    }

    async fn add_post_to_category(
        &self,
        post_id: PostId,
        category_id: CategoryId,
    ) -> RepoResult<()> {
        let link: post_category::ActiveModel = PostCategory::new(post_id, category_id).into();
        link.insert(self.conn()).await.map_err(map_db_err)?;

        tracing::debug!(post_id, category_id, "Post added to category");
        Ok(())
    }

    async fn remove_post_from_category(
        &self,
        post_id: PostId,
        category_id: CategoryId,
    ) -> RepoResult<()> {
        PostCategoryEntity::delete_many()
            .filter(post_category::Column::PostId.eq(post_id))
            .filter(post_category::Column::CategoryId.eq(category_id))
            .exec(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(())
    }

    async fn find_by_post_id(&self, post_id: PostId) -> RepoResult<Vec<Category>> {
        let result = CategoryEntity::find()
            .join(JoinType::InnerJoin, category::Relation::PostCategory.def())
            .filter(post_category::Column::PostId.eq(post_id))
            .order_by_asc(category::Column::Name)
            .all(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
