//! SeaORM entity models, one per table.

pub mod category;
pub mod comment;
pub mod post;
pub mod post_category;
