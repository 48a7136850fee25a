//! Application layer - maps request/response DTOs onto domain services.
//!
//! Errors leave this layer as [`DomainError`](crate::DomainError), keeping the
//! kind the repository reported.

mod category_app;
mod comment_app;
mod post_app;

pub use category_app::CategoryApp;
pub use comment_app::CommentApp;
pub use post_app::PostApp;
