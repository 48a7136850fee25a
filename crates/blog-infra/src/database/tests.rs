use std::sync::Arc;

use blog_core::domain::Post;
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostRepository};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

use crate::database::entity::post;
use crate::database::seaorm_repo::{SeaOrmCommentRepository, SeaOrmPostRepository};

fn exec_result(rows_affected: u64) -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected,
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let now = chrono::Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post::Model {
            id: 7,
            title: "Test Post".to_owned(),
            content: "Content".to_owned(),
            author: "Alice".to_owned(),
            title_url: Some("test-post".to_owned()),
            view_count: 3,
            created_at: now.into(),
            updated_at: now.into(),
        }]])
        .into_connection();

    let repo = SeaOrmPostRepository::new(Arc::new(db));

    let post: Post = repo.find_by_id(7).await.unwrap();

    assert_eq!(post.id, 7);
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.title_url.as_deref(), Some("test-post"));
    assert_eq!(post.view_count, 3);
}

#[tokio::test]
async fn test_find_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();

    let repo = SeaOrmPostRepository::new(Arc::new(db));

    let err = repo.find_by_id(42).await.unwrap_err();
    assert_eq!(err, RepoError::not_found("post", 42));
}

#[tokio::test]
async fn test_increment_view_count_of_missing_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![exec_result(0)])
        .into_connection();

    let repo = SeaOrmPostRepository::new(Arc::new(db));

    let err = repo.increment_view_count(9).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_delete_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![exec_result(0)])
        .into_connection();

    let repo = SeaOrmPostRepository::new(Arc::new(db));

    assert!(repo.delete(5).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_delete_missing_comment_succeeds() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![exec_result(0)])
        .into_connection();

    let repo = SeaOrmCommentRepository::new(Arc::new(db));

    assert!(repo.delete(5).await.is_ok());
}

#[tokio::test]
async fn test_find_for_update_locks_the_row() {
    let now = chrono::Utc::now();

    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post::Model {
                id: 3,
                title: "Locked".to_owned(),
                content: "Content".to_owned(),
                author: "Alice".to_owned(),
                title_url: None,
                view_count: 5,
                created_at: now.into(),
                updated_at: now.into(),
            }]])
            .into_connection(),
    );

    let repo = SeaOrmPostRepository::new(db.clone());
    let post = repo.find_by_id_for_update(3).await.unwrap();
    assert_eq!(post.view_count, 5);
    drop(repo);

    let Ok(db) = Arc::try_unwrap(db) else {
        panic!("connection still shared");
    };
    let log = db.into_transaction_log();
    let sql = log[0].statements()[0].sql.clone();
    assert!(sql.contains("FOR UPDATE"), "unexpected query: {sql}");
}
