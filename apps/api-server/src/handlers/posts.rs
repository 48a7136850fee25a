//! Post handlers.

use actix_web::{HttpResponse, web};

use blog_core::domain::{CategoryId, PostId};
use blog_shared::ApiResponse;
use blog_shared::dto::{CreatePostRequest, UpdatePostRequest};

use super::require_non_empty;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    require_non_empty(&[
        ("title", req.title.as_str()),
        ("content", req.content.as_str()),
        ("author", req.author.as_str()),
    ])?;

    let post = state.posts.create_post(req).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(post, "Post created")))
}

/// GET /api/posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.get_all_posts().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get_post_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}

/// PUT /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<PostId>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    require_non_empty(&[("title", req.title.as_str()), ("content", req.content.as_str())])?;

    let post = state.posts.update_post(path.into_inner(), req).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(post, "Post updated")))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    state.posts.delete_post(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Post deleted")))
}

/// GET /api/posts/category/{id}
pub async fn posts_by_category(
    state: web::Data<AppState>,
    path: web::Path<CategoryId>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.get_posts_by_category(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}

/// POST /api/posts/{id}/views
pub async fn record_view(
    state: web::Data<AppState>,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    state.posts.increment_view_count(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("View recorded")))
}

/// POST /api/posts/{id}/categories/{category_id}
pub async fn add_to_category(
    state: web::Data<AppState>,
    path: web::Path<(PostId, CategoryId)>,
) -> AppResult<HttpResponse> {
    let (post_id, category_id) = path.into_inner();
    state
        .posts
        .add_post_to_category(post_id, category_id)
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::message("Post added to category")))
}

/// DELETE /api/posts/{id}/categories/{category_id}
pub async fn remove_from_category(
    state: web::Data<AppState>,
    path: web::Path<(PostId, CategoryId)>,
) -> AppResult<HttpResponse> {
    let (post_id, category_id) = path.into_inner();
    state
        .posts
        .remove_post_from_category(post_id, category_id)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Post removed from category")))
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test, web};
    use blog_infra::InMemoryBlogStore;
    use serde_json::{Value, json};

    use crate::handlers::configure_routes;
    use crate::state::AppState;

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(AppState::in_memory(&InMemoryBlogStore::new())))
                    .configure(configure_routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_create_and_fetch_post_with_categories() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/api/categories")
            .set_json(json!({ "name": "tech" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({
                "title": "A",
                "content": "B",
                "author": "C",
                "category_ids": [1]
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["id"], 1);
        assert_eq!(body["data"]["view_count"], 0);

        let req = test::TestRequest::get().uri("/api/posts/1").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["content"], "B");
        assert_eq!(body["data"]["categories"][0]["name"], "tech");
    }

    #[actix_web::test]
    async fn test_blank_title_is_unprocessable() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({ "title": "", "content": "B", "author": "C" }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["detail"], "title is required");
    }

    #[actix_web::test]
    async fn test_missing_post_is_not_found() {
        let app = app!();

        let req = test::TestRequest::get().uri("/api/posts/42").to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["status"], 404);
    }

    #[actix_web::test]
    async fn test_malformed_id_is_bad_request() {
        let app = app!();

        let req = test::TestRequest::get().uri("/api/posts/abc").to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_record_view_and_duplicate_category_link() {
        let app = app!();

        for req in [
            test::TestRequest::post()
                .uri("/api/posts")
                .set_json(json!({ "title": "A", "content": "B", "author": "C" }))
                .to_request(),
            test::TestRequest::post()
                .uri("/api/categories")
                .set_json(json!({ "name": "tech" }))
                .to_request(),
        ] {
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
        }

        for _ in 0..2 {
            let req = test::TestRequest::post().uri("/api/posts/1/views").to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        }

        let req = test::TestRequest::post()
            .uri("/api/posts/1/categories/1")
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
        let req = test::TestRequest::post()
            .uri("/api/posts/1/categories/1")
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::get().uri("/api/posts").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"][0]["view_count"], 2);

        let req = test::TestRequest::get().uri("/api/posts/category/1").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
    }

    #[actix_web::test]
    async fn test_update_and_delete_post() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({ "title": "A", "content": "B", "author": "C" }))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::put()
            .uri("/api/posts/1")
            .set_json(json!({ "title": "A2", "content": "B2", "title_url": "a2" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["title"], "A2");
        assert_eq!(body["data"]["title_url"], "a2");

        let req = test::TestRequest::delete().uri("/api/posts/1").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::delete().uri("/api/posts/1").to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }
}
