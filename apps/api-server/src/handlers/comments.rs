//! Comment handlers.

use actix_web::{HttpResponse, web};

use blog_core::domain::{CommentId, PostId};
use blog_shared::ApiResponse;
use blog_shared::dto::CreateCommentRequest;

use super::require_non_empty;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/comments
pub async fn create_comment(
    state: web::Data<AppState>,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    require_non_empty(&[
        ("content", req.content.as_str()),
        ("author", req.author.as_str()),
    ])?;

    let comment = state.comments.create_comment(req).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(comment, "Comment created")))
}

/// GET /api/comments/{id}
pub async fn get_comment(
    state: web::Data<AppState>,
    path: web::Path<CommentId>,
) -> AppResult<HttpResponse> {
    let comment = state.comments.get_comment_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(comment)))
}

/// GET /api/comments/post/{id}
pub async fn comments_by_post(
    state: web::Data<AppState>,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    let comments = state
        .comments
        .get_comments_by_post_id(path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(comments)))
}

/// DELETE /api/comments/{id}
pub async fn delete_comment(
    state: web::Data<AppState>,
    path: web::Path<CommentId>,
) -> AppResult<HttpResponse> {
    state.comments.delete_comment(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Comment deleted")))
}
