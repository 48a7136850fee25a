use serde::{Deserialize, Serialize};

use super::{CategoryId, PostId};

/// Association row linking one post to one category.
///
/// A `(post_id, category_id)` pair exists at most once; storage enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostCategory {
    pub id: i32,
    pub post_id: PostId,
    pub category_id: CategoryId,
}

impl PostCategory {
    pub fn new(post_id: PostId, category_id: CategoryId) -> Self {
        Self {
            id: 0,
            post_id,
            category_id,
        }
    }
}
