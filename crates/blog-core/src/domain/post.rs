use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Storage-assigned post identifier.
pub type PostId = i32;

/// Post entity - represents a blog post or article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author: String,
    /// URL slug derived from the title, if the author supplied one.
    pub title_url: Option<String>,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new, not yet persisted post.
    ///
    /// The id stays `0` until storage assigns one. Both timestamps are taken
    /// from the same instant.
    pub fn new(title: String, content: String, author: String, title_url: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            title,
            content,
            author,
            title_url,
            view_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the editable fields and refresh `updated_at`.
    pub fn update(&mut self, title: String, content: String, title_url: Option<String>) {
        self.title = title;
        self.content = content;
        self.title_url = title_url;
        self.updated_at = Utc::now();
    }
}
