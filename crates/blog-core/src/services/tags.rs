use std::sync::Arc;

use crate::domain::{Post, Tag};
use crate::error::{DomainError, DomainResult};
use crate::ports::{PostRepository, TagRepository};

/// Tag lookup.
#[derive(Clone)]
pub struct TagService {
    tags: Arc<dyn TagRepository>,
    posts: Arc<dyn PostRepository>,
}

impl TagService {
    pub fn new(tags: Arc<dyn TagRepository>, posts: Arc<dyn PostRepository>) -> Self {
        Self { tags, posts }
    }

    pub async fn list(&self) -> DomainResult<Vec<Tag>> {
        Ok(self.tags.list().await?)
    }

    /// Posts associated with the tag called exactly `name`.
    pub async fn posts_for_tag(&self, name: &str) -> DomainResult<Vec<Post>> {
        tracing::debug!(tag = %name, "Looking up posts by tag");
        let tag = self
            .tags
            .find_by_name(name)
            .await?
            .ok_or_else(|| DomainError::not_found("Tag", name))?;

        Ok(self.posts.find_by_tag(tag.id).await?)
    }
}
