use std::sync::Arc;

use uuid::Uuid;

use crate::domain::Comment;
use crate::error::{DomainError, DomainResult, FieldError};
use crate::policy::{Action, Resource, authorize};
use crate::ports::{CommentRepository, PostRepository};

/// Comment access, scoped to a parent post for listing and creation.
#[derive(Clone)]
pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
    posts: Arc<dyn PostRepository>,
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentRepository>, posts: Arc<dyn PostRepository>) -> Self {
        Self { comments, posts }
    }

    /// Comments of one post. An unknown post simply has none.
    pub async fn list_for_post(&self, post_id: Uuid) -> DomainResult<Vec<Comment>> {
        Ok(self.comments.find_by_post_id(post_id).await?)
    }

    /// Attach a new comment to `post_id`, owned by the principal.
    pub async fn create(
        &self,
        principal: Option<Uuid>,
        post_id: Uuid,
        content: String,
    ) -> DomainResult<Comment> {
        authorize(Resource::Comment, Action::Create, principal, None)?;
        let owner = principal.ok_or(DomainError::Unauthenticated)?;

        if self.posts.find_by_id(post_id).await?.is_none() {
            return Err(DomainError::not_found("Post", post_id));
        }

        let errors = Comment::validate_content(&content);
        if !errors.is_empty() {
            return Err(DomainError::Validation(errors));
        }

        let comment = self
            .comments
            .insert(Comment::new(post_id, owner, content))
            .await?;
        tracing::info!(comment_id = %comment.id, post_id = %post_id, "Comment created");
        Ok(comment)
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<Comment> {
        self.comments
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Comment", id))
    }

    pub async fn update(
        &self,
        principal: Option<Uuid>,
        id: Uuid,
        content: Option<String>,
        action: Action,
    ) -> DomainResult<Comment> {
        let mut comment = self.get(id).await?;
        authorize(Resource::Comment, action, principal, Some(comment.user_id))?;

        let Some(content) = content else {
            if action == Action::Update {
                return Err(DomainError::Validation(vec![FieldError::new(
                    "content",
                    "This field is required.",
                )]));
            }
            return Ok(comment);
        };

        let errors = Comment::validate_content(&content);
        if !errors.is_empty() {
            return Err(DomainError::Validation(errors));
        }

        comment.edit(content);
        let comment = self.comments.update(comment).await?;
        tracing::info!(comment_id = %comment.id, "Comment updated");
        Ok(comment)
    }

    pub async fn delete(&self, principal: Option<Uuid>, id: Uuid) -> DomainResult<()> {
        let comment = self.get(id).await?;
        authorize(Resource::Comment, Action::Destroy, principal, Some(comment.user_id))?;

        self.comments.delete(id).await?;
        tracing::info!(comment_id = %id, "Comment deleted");
        Ok(())
    }
}
