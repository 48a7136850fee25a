use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PostId;

pub type CommentId = i32;

/// Comment entity - a reader's reply attached to one post.
///
/// Comments are immutable once written; there is no update path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new comment for `post_id`, stamped with the current time.
    pub fn new(post_id: PostId, content: String, author: String) -> Self {
        Self {
            id: 0,
            post_id,
            content,
            author,
            created_at: Utc::now(),
        }
    }
}
