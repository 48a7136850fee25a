use std::sync::Arc;

use blog_shared::dto::{CommentResponse, CreateCommentRequest};

use crate::domain::{Comment, CommentId, PostId};
use crate::error::DomainResult;
use crate::services::CommentService;

#[derive(Clone)]
pub struct CommentApp {
    comment_service: Arc<CommentService>,
}

impl CommentApp {
    pub fn new(comment_service: Arc<CommentService>) -> Self {
        Self { comment_service }
    }

    pub async fn create_comment(&self, req: CreateCommentRequest) -> DomainResult<CommentResponse> {
        let comment = self
            .comment_service
            .create_comment(req.post_id, req.content, req.author)
            .await?;

        Ok(comment.into())
    }

    pub async fn get_comment_by_id(&self, id: CommentId) -> DomainResult<CommentResponse> {
        let comment = self.comment_service.get_comment_by_id(id).await?;
        Ok(comment.into())
    }

    pub async fn get_comments_by_post_id(
        &self,
        post_id: PostId,
    ) -> DomainResult<Vec<CommentResponse>> {
        let comments = self.comment_service.get_comments_by_post_id(post_id).await?;
        Ok(comments.into_iter().map(Into::into).collect())
    }

    pub async fn delete_comment(&self, id: CommentId) -> DomainResult<()> {
        Ok(self.comment_service.delete_comment(id).await?)
    }
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            content: comment.content,
            author: comment.author,
            created_at: comment.created_at,
        }
    }
}
