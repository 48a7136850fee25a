//! Domain entities - the core business objects.

mod category;
mod comment;
mod post;
mod post_category;

pub use category::{Category, CategoryId};
pub use comment::{Comment, CommentId};
pub use post::{Post, PostId};
pub use post_category::PostCategory;
