//! Mapping from domain read models to response bodies.

use serde::Serialize;

use blog_core::domain::{Comment, PostView, Tag};
use blog_shared::dto::{CommentResponse, PostListItem, PostResponse, TagResponse};

/// A post rendered in the representation its action calls for.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PostBody {
    Full(PostResponse),
    Compact(PostListItem),
}

impl From<PostView> for PostBody {
    fn from(view: PostView) -> Self {
        match view {
            PostView::Full(detail) => PostBody::Full(PostResponse {
                id: detail.post.id,
                user_id: detail.post.user_id,
                name: detail.post.name,
                content: detail.post.content,
                image: detail.post.image,
                likes_num: detail.post.likes_num,
                created_at: detail.post.created_at,
                updated_at: detail.post.updated_at,
                like: detail.liked_by,
                tag: detail.tags,
                comments: detail.comments.into_iter().map(comment_body).collect(),
            }),
            PostView::Compact(summary) => PostBody::Compact(PostListItem {
                id: summary.post.id,
                name: summary.post.name,
                created_at: summary.post.created_at,
                updated_at: summary.post.updated_at,
                image: summary.post.image,
                comments_cnt: summary.comments_cnt,
                tag: summary.tags,
                likes_num: summary.post.likes_num,
            }),
        }
    }
}

pub fn post_bodies(views: Vec<PostView>) -> Vec<PostBody> {
    views.into_iter().map(PostBody::from).collect()
}

pub fn comment_body(comment: Comment) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        post: comment.post_id,
        user_id: comment.user_id,
        content: comment.content,
        created_at: comment.created_at,
        updated_at: comment.updated_at,
    }
}

pub fn tag_body(tag: Tag) -> TagResponse {
    TagResponse {
        id: tag.id,
        name: tag.name,
    }
}
