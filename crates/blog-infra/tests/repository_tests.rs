#![cfg(feature = "postgres")]

mod common;

use blog_core::domain::{Category, Comment, Post};
use blog_core::error::RepoError;
use blog_core::ports::{
    BaseRepository, CategoryRepository, CommentRepository, PostRepository, UnitOfWork,
};
use chrono::{Duration, Utc};

fn post(title: &str) -> Post {
    Post::new(
        title.to_string(),
        "Content".to_string(),
        "Alice".to_string(),
        None,
    )
}

#[tokio::test]
async fn test_create_assigns_id_and_keeps_fields() {
    let pool = common::sqlite_pool().await;
    let posts = pool.post_repository();

    let mut draft = post("Hello");
    draft.title_url = Some("hello".to_string());
    let created = posts.create(draft).await.unwrap();

    assert_eq!(created.id, 1);
    assert_eq!(created.view_count, 0);

    let loaded = posts.find_by_id(created.id).await.unwrap();
    assert_eq!(loaded.title, "Hello");
    assert_eq!(loaded.title_url.as_deref(), Some("hello"));
}

#[tokio::test]
async fn test_find_by_id_of_absent_rows_is_not_found() {
    let pool = common::sqlite_pool().await;

    assert_eq!(
        pool.post_repository().find_by_id(1).await.unwrap_err(),
        RepoError::not_found("post", 1)
    );
    assert_eq!(
        pool.comment_repository().find_by_id(2).await.unwrap_err(),
        RepoError::not_found("comment", 2)
    );
    assert_eq!(
        pool.category_repository().find_by_id(3).await.unwrap_err(),
        RepoError::not_found("category", 3)
    );
}

#[tokio::test]
async fn test_find_all_is_newest_first() {
    let pool = common::sqlite_pool().await;
    let posts = pool.post_repository();

    assert!(posts.find_all().await.unwrap().is_empty());

    let mut older = post("Older");
    older.created_at = Utc::now() - Duration::hours(1);
    posts.create(older).await.unwrap();
    posts.create(post("Newer")).await.unwrap();

    let titles: Vec<String> = posts
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(titles, vec!["Newer", "Older"]);
}

#[tokio::test]
async fn test_pool_clones_share_one_database() {
    let pool = common::sqlite_pool().await;
    let other = pool.clone();

    let created = pool.post_repository().create(post("Shared")).await.unwrap();
    let found = other.post_repository().find_by_id(created.id).await.unwrap();

    assert_eq!(found.title, "Shared");
    other.close().await.unwrap();
}

#[tokio::test]
async fn test_update_refreshes_updated_at() {
    let pool = common::sqlite_pool().await;
    let posts = pool.post_repository();

    let mut draft = post("Hello");
    let long_ago = Utc::now() - Duration::days(1);
    draft.created_at = long_ago;
    draft.updated_at = long_ago;
    let mut created = posts.create(draft).await.unwrap();

    created.title = "Edited".to_string();
    created.updated_at = long_ago;
    let updated = posts.update(created).await.unwrap();

    assert_eq!(updated.title, "Edited");
    assert!(updated.updated_at > long_ago);
}

#[tokio::test]
async fn test_update_of_missing_post_is_not_found() {
    let pool = common::sqlite_pool().await;

    let mut ghost = post("Ghost");
    ghost.id = 99;
    let err = pool.post_repository().update(ghost).await.unwrap_err();

    assert!(err.is_not_found());
    assert!(pool.post_repository().find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_find_for_update_inside_transaction() {
    let pool = common::sqlite_pool().await;
    let created = pool.post_repository().create(post("Hello")).await.unwrap();

    let tx = pool.unit_of_work().begin().await.unwrap();
    let locked = tx.posts().find_by_id_for_update(created.id).await.unwrap();
    let err = tx.posts().find_by_id_for_update(99).await.unwrap_err();
    tx.commit().await.unwrap();

    assert_eq!(locked.id, created.id);
    assert_eq!(locked.title, "Hello");
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_increment_view_count_adds_one_per_call() {
    let pool = common::sqlite_pool().await;
    let posts = pool.post_repository();
    let created = posts.create(post("Hello")).await.unwrap();

    for _ in 0..5 {
        posts.increment_view_count(created.id).await.unwrap();
    }

    assert_eq!(posts.find_by_id(created.id).await.unwrap().view_count, 5);
    assert!(posts.increment_view_count(42).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_comments_for_post_are_newest_first() {
    let pool = common::sqlite_pool().await;
    let created = pool.post_repository().create(post("Hello")).await.unwrap();
    let comments = pool.comment_repository();

    let mut first = Comment::new(created.id, "First".to_string(), "Bob".to_string());
    first.created_at = Utc::now() - Duration::minutes(5);
    comments.create(first).await.unwrap();
    comments
        .create(Comment::new(created.id, "Second".to_string(), "Eve".to_string()))
        .await
        .unwrap();

    let listed = comments.find_by_post_id(created.id).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].content, "Second");
    assert_eq!(listed[1].content, "First");

    assert!(comments.find_by_post_id(999).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_missing_comment_is_a_no_op() {
    let pool = common::sqlite_pool().await;

    assert!(pool.comment_repository().delete(12).await.is_ok());
}

#[tokio::test]
async fn test_duplicate_category_name_is_conflict() {
    let pool = common::sqlite_pool().await;
    let categories = pool.category_repository();

    categories
        .create(Category::new("tech".to_string(), None))
        .await
        .unwrap();
    let err = categories
        .create(Category::new("tech".to_string(), Some("again".to_string())))
        .await
        .unwrap_err();

    assert!(err.is_conflict());
}

#[tokio::test]
async fn test_categories_are_ordered_by_name() {
    let pool = common::sqlite_pool().await;
    let categories = pool.category_repository();

    for name in ["rust", "go", "python"] {
        categories
            .create(Category::new(name.to_string(), None))
            .await
            .unwrap();
    }

    let names: Vec<String> = categories
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["go", "python", "rust"]);
}

#[tokio::test]
async fn test_duplicate_association_is_conflict() {
    let pool = common::sqlite_pool().await;
    let created = pool.post_repository().create(post("Hello")).await.unwrap();
    let categories = pool.category_repository();
    let tech = categories
        .create(Category::new("tech".to_string(), None))
        .await
        .unwrap();

    categories
        .add_post_to_category(created.id, tech.id)
        .await
        .unwrap();
    let err = categories
        .add_post_to_category(created.id, tech.id)
        .await
        .unwrap_err();

    assert!(err.is_conflict());
    assert_eq!(
        categories.find_by_post_id(created.id).await.unwrap(),
        vec![tech]
    );
}

#[tokio::test]
async fn test_association_with_missing_category_is_conflict() {
    let pool = common::sqlite_pool().await;
    let created = pool.post_repository().create(post("Hello")).await.unwrap();

    let err = pool
        .category_repository()
        .add_post_to_category(created.id, 77)
        .await
        .unwrap_err();

    assert!(err.is_conflict());
}

#[tokio::test]
async fn test_remove_association() {
    let pool = common::sqlite_pool().await;
    let posts = pool.post_repository();
    let categories = pool.category_repository();
    let created = posts.create(post("Hello")).await.unwrap();
    let tech = categories
        .create(Category::new("tech".to_string(), None))
        .await
        .unwrap();
    categories
        .add_post_to_category(created.id, tech.id)
        .await
        .unwrap();

    categories
        .remove_post_from_category(created.id, tech.id)
        .await
        .unwrap();
    // Removing a missing link is fine.
    categories
        .remove_post_from_category(created.id, tech.id)
        .await
        .unwrap();

    assert!(posts.find_by_category(tech.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_deleting_post_cascades_to_comments_and_links() {
    let pool = common::sqlite_pool().await;
    let posts = pool.post_repository();
    let comments = pool.comment_repository();
    let categories = pool.category_repository();

    let created = posts.create(post("Hello")).await.unwrap();
    let tech = categories
        .create(Category::new("tech".to_string(), None))
        .await
        .unwrap();
    categories
        .add_post_to_category(created.id, tech.id)
        .await
        .unwrap();
    let comment = comments
        .create(Comment::new(created.id, "Nice".to_string(), "Bob".to_string()))
        .await
        .unwrap();

    posts.delete(created.id).await.unwrap();

    assert!(comments.find_by_id(comment.id).await.unwrap_err().is_not_found());
    assert!(posts.find_by_category(tech.id).await.unwrap().is_empty());
    assert!(categories.find_by_id(tech.id).await.is_ok());
}

#[tokio::test]
async fn test_deleting_category_keeps_posts() {
    let pool = common::sqlite_pool().await;
    let posts = pool.post_repository();
    let categories = pool.category_repository();

    let created = posts.create(post("Hello")).await.unwrap();
    let tech = categories
        .create(Category::new("tech".to_string(), None))
        .await
        .unwrap();
    categories
        .add_post_to_category(created.id, tech.id)
        .await
        .unwrap();

    categories.delete(tech.id).await.unwrap();

    assert!(categories.find_by_post_id(created.id).await.unwrap().is_empty());
    assert!(posts.find_by_id(created.id).await.is_ok());
    assert!(categories.delete(tech.id).await.unwrap_err().is_not_found());
}
