use std::sync::Arc;

use uuid::Uuid;

use crate::domain::LikeState;
use crate::error::{DomainError, DomainResult};
use crate::policy::{Action, Resource, authorize};
use crate::ports::PostRepository;

/// Flips a principal's like on a post.
///
/// Membership check, relation change and counter change happen inside the
/// store in one step, so concurrent toggles never lose an update.
#[derive(Clone)]
pub struct LikeToggler {
    posts: Arc<dyn PostRepository>,
}

impl LikeToggler {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    pub async fn toggle(&self, principal: Option<Uuid>, post_id: Uuid) -> DomainResult<LikeState> {
        let post = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Post", post_id))?;
        authorize(Resource::Post, Action::Like, principal, Some(post.user_id))?;
        let user_id = principal.ok_or(DomainError::Unauthenticated)?;

        let state = self.posts.toggle_like(post_id, user_id).await?;
        tracing::info!(
            post_id = %post_id,
            user_id = %user_id,
            liked = state.liked,
            likes_num = state.likes_num,
            "Like toggled"
        );
        Ok(state)
    }
}
