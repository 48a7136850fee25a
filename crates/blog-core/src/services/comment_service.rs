use std::sync::Arc;

use tracing::instrument;

use crate::domain::{Comment, CommentId, PostId};
use crate::error::RepoResult;
use crate::ports::{CommentRepository, PostRepository};

/// Comment use-cases.
#[derive(Clone)]
pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
    posts: Arc<dyn PostRepository>,
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentRepository>, posts: Arc<dyn PostRepository>) -> Self {
        Self { comments, posts }
    }

    /// Attach a new comment to an existing post.
    ///
    /// The post lookup runs first; if it fails nothing is written and the
    /// lookup error is returned as is.
    #[instrument(skip(self, content))]
    pub async fn create_comment(
        &self,
        post_id: PostId,
        content: String,
        author: String,
    ) -> RepoResult<Comment> {
        self.posts.find_by_id(post_id).await?;

        let comment = self
            .comments
            .create(Comment::new(post_id, content, author))
            .await?;
        tracing::info!(comment_id = comment.id, post_id, "Comment created");
        Ok(comment)
    }

    pub async fn get_comment_by_id(&self, id: CommentId) -> RepoResult<Comment> {
        self.comments.find_by_id(id).await
    }

    pub async fn get_comments_by_post_id(&self, post_id: PostId) -> RepoResult<Vec<Comment>> {
        self.comments.find_by_post_id(post_id).await
    }

    pub async fn delete_comment(&self, id: CommentId) -> RepoResult<()> {
        self.comments.delete(id).await
    }
}
