//! Read models assembled from a post and its relations.

use uuid::Uuid;

use super::{Comment, Post};

/// Output shape of a post, chosen per action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    /// Every field plus likers, tag names and nested comments.
    Full,
    /// List view with counts instead of nested data.
    Compact,
}

/// Full post view.
#[derive(Debug, Clone)]
pub struct PostDetail {
    pub post: Post,
    pub liked_by: Vec<Uuid>,
    pub tags: Vec<String>,
    pub comments: Vec<Comment>,
}

/// Compact post view used in list contexts.
#[derive(Debug, Clone)]
pub struct PostSummary {
    pub post: Post,
    pub comments_cnt: u64,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone)]
pub enum PostView {
    Full(PostDetail),
    Compact(PostSummary),
}

impl PostView {
    pub fn post(&self) -> &Post {
        match self {
            PostView::Full(detail) => &detail.post,
            PostView::Compact(summary) => &summary.post,
        }
    }
}
