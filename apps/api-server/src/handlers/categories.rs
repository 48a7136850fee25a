//! Category handlers.

use actix_web::{HttpResponse, web};

use blog_core::domain::CategoryId;
use blog_shared::ApiResponse;
use blog_shared::dto::{CreateCategoryRequest, UpdateCategoryRequest};

use super::require_non_empty;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/categories
pub async fn create_category(
    state: web::Data<AppState>,
    body: web::Json<CreateCategoryRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    require_non_empty(&[("name", req.name.as_str())])?;

    let category = state.categories.create_category(req).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(category, "Category created")))
}

/// GET /api/categories
pub async fn list_categories(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let categories = state.categories.get_all_categories().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(categories)))
}

/// GET /api/categories/{id}
pub async fn get_category(
    state: web::Data<AppState>,
    path: web::Path<CategoryId>,
) -> AppResult<HttpResponse> {
    let category = state.categories.get_category_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(category)))
}

/// PUT /api/categories/{id}
pub async fn update_category(
    state: web::Data<AppState>,
    path: web::Path<CategoryId>,
    body: web::Json<UpdateCategoryRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    require_non_empty(&[("name", req.name.as_str())])?;

    let category = state
        .categories
        .update_category(path.into_inner(), req)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(category, "Category updated")))
}

/// DELETE /api/categories/{id}
pub async fn delete_category(
    state: web::Data<AppState>,
    path: web::Path<CategoryId>,
) -> AppResult<HttpResponse> {
    state.categories.delete_category(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Category deleted")))
}
