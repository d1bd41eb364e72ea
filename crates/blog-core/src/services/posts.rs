//! Post lifecycle and hashtag synchronization.

use std::sync::Arc;

use futures::future::try_join_all;
use uuid::Uuid;

use crate::domain::{
    NewPost, Post, PostChanges, PostDetail, PostSummary, PostView, Representation,
    extract_hashtags,
};
use crate::error::{DomainError, DomainResult};
use crate::policy::{Action, Resource, authorize};
use crate::ports::{CommentRepository, PostRepository};

fn hashtag_names(content: &str) -> Vec<String> {
    extract_hashtags(content).into_iter().map(str::to_owned).collect()
}

/// Creates, edits and renders posts.
///
/// Every create and update re-derives the post's tags from its content, so
/// the stored associations always match the hashtags in the current text.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, comments: Arc<dyn CommentRepository>) -> Self {
        Self { posts, comments }
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<Post> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Post", id))
    }

    pub async fn list(&self) -> DomainResult<Vec<Post>> {
        Ok(self.posts.list().await?)
    }

    pub async fn top_liked(&self, limit: u64) -> DomainResult<Vec<Post>> {
        Ok(self.posts.top_by_likes(limit).await?)
    }

    pub async fn create(&self, principal: Option<Uuid>, draft: NewPost) -> DomainResult<Post> {
        authorize(Resource::Post, Action::Create, principal, None)?;
        let owner = principal.ok_or(DomainError::Unauthenticated)?;

        let errors = draft.validate();
        if !errors.is_empty() {
            return Err(DomainError::Validation(errors));
        }

        let tags = hashtag_names(&draft.content);
        let post = self.posts.insert_with_tags(Post::new(owner, draft), &tags).await?;

        tracing::info!(post_id = %post.id, user_id = %owner, tags = tags.len(), "Post created");
        Ok(post)
    }

    /// Apply `changes` to a post. `action` is [`Action::Update`] for a full
    /// replacement or [`Action::PartialUpdate`] for a patch.
    pub async fn update(
        &self,
        principal: Option<Uuid>,
        id: Uuid,
        changes: PostChanges,
        action: Action,
    ) -> DomainResult<Post> {
        let mut post = self.get(id).await?;
        authorize(Resource::Post, action, principal, Some(post.user_id))?;

        let errors = changes.validate(action == Action::Update);
        if !errors.is_empty() {
            return Err(DomainError::Validation(errors));
        }

        post.apply(changes);
        let tags = hashtag_names(&post.content);
        let post = self.posts.update_with_tags(post, &tags).await?;

        tracing::info!(post_id = %post.id, tags = tags.len(), "Post updated");
        Ok(post)
    }

    /// Delete a post together with its comments, likes and tag links.
    pub async fn delete(&self, principal: Option<Uuid>, id: Uuid) -> DomainResult<()> {
        let post = self.get(id).await?;
        authorize(Resource::Post, Action::Destroy, principal, Some(post.user_id))?;

        self.posts.delete(id).await?;
        tracing::info!(post_id = %id, "Post deleted");
        Ok(())
    }

    /// Build the requested view of a post.
    pub async fn present(&self, post: Post, representation: Representation) -> DomainResult<PostView> {
        let tags = self.posts.tag_names(post.id).await?;

        let view = match representation {
            Representation::Full => {
                let liked_by = self.posts.liked_by(post.id).await?;
                let comments = self.comments.find_by_post_id(post.id).await?;
                PostView::Full(PostDetail {
                    post,
                    liked_by,
                    tags,
                    comments,
                })
            }
            Representation::Compact => {
                let comments_cnt = self.comments.count_by_post_id(post.id).await?;
                PostView::Compact(PostSummary {
                    post,
                    comments_cnt,
                    tags,
                })
            }
        };
        Ok(view)
    }

    pub async fn present_all(
        &self,
        posts: Vec<Post>,
        representation: Representation,
    ) -> DomainResult<Vec<PostView>> {
        try_join_all(posts.into_iter().map(|post| self.present(post, representation))).await
    }
}
