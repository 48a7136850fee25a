//! HTTP handlers and route configuration.

mod categories;
mod comments;
mod health;
mod posts;

use actix_web::{HttpRequest, error, web};

use crate::middleware::error::{AppError, AppResult};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::PathConfig::default().error_handler(path_error))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health::health_check))
                .service(
                    web::scope("/posts")
                        .route("", web::post().to(posts::create_post))
                        .route("", web::get().to(posts::list_posts))
                        .route("/category/{id}", web::get().to(posts::posts_by_category))
                        .route("/{id}", web::get().to(posts::get_post))
                        .route("/{id}", web::put().to(posts::update_post))
                        .route("/{id}", web::delete().to(posts::delete_post))
                        .route("/{id}/views", web::post().to(posts::record_view))
                        .route(
                            "/{id}/categories/{category_id}",
                            web::post().to(posts::add_to_category),
                        )
                        .route(
                            "/{id}/categories/{category_id}",
                            web::delete().to(posts::remove_from_category),
                        ),
                )
                .service(
                    web::scope("/comments")
                        .route("", web::post().to(comments::create_comment))
                        .route("/post/{id}", web::get().to(comments::comments_by_post))
                        .route("/{id}", web::get().to(comments::get_comment))
                        .route("/{id}", web::delete().to(comments::delete_comment)),
                )
                .service(
                    web::scope("/categories")
                        .route("", web::post().to(categories::create_category))
                        .route("", web::get().to(categories::list_categories))
                        .route("/{id}", web::get().to(categories::get_category))
                        .route("/{id}", web::put().to(categories::update_category))
                        .route("/{id}", web::delete().to(categories::delete_category)),
                ),
        );
}

fn json_error(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

fn path_error(err: error::PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

/// Reject blank required fields with a 422 listing every offender.
fn require_non_empty(fields: &[(&str, &str)]) -> AppResult<()> {
    let errors: Vec<String> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| format!("{name} is required"))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_non_empty_lists_blank_fields() {
        let err = require_non_empty(&[("title", " "), ("content", "x"), ("author", "")])
            .unwrap_err();

        match err {
            AppError::Validation(errors) => {
                assert_eq!(errors, vec!["title is required", "author is required"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
