//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Request to create a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub name: String,
    pub content: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Request to update a post, used by both PUT and PATCH.
///
/// `image` distinguishes an absent key (keep) from an explicit `null` (clear).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<Option<String>>,
}

fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Request to create a comment. Any `post` key in the body is ignored; the
/// parent always comes from the path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

/// Request to update a comment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCommentRequest {
    #[serde(default)]
    pub content: Option<String>,
}

/// A comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub post: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full post representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub content: String,
    pub image: Option<String>,
    pub likes_num: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Users who like the post.
    pub like: Vec<Uuid>,
    /// Tag names in association order.
    pub tag: Vec<String>,
    pub comments: Vec<CommentResponse>,
}

/// Compact post representation for list contexts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListItem {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub image: Option<String>,
    pub comments_cnt: u64,
    pub tag: Vec<String>,
    pub likes_num: i64,
}

/// A tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagResponse {
    pub id: Uuid,
    pub name: String,
}

/// The authenticated principal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrincipalResponse {
    pub user_id: Uuid,
    pub roles: Vec<String>,
    /// Token expiry, unix seconds.
    pub expires_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_distinguishes_null_image() {
        let absent: UpdatePostRequest = serde_json::from_str(r#"{"name":"n"}"#).unwrap();
        assert_eq!(absent.image, None);

        let cleared: UpdatePostRequest = serde_json::from_str(r#"{"image":null}"#).unwrap();
        assert_eq!(cleared.image, Some(None));

        let set: UpdatePostRequest =
            serde_json::from_str(r#"{"image":"https://cdn.example.com/p.png"}"#).unwrap();
        assert_eq!(set.image, Some(Some("https://cdn.example.com/p.png".to_string())));
    }

    #[test]
    fn test_comment_request_ignores_post_key() {
        let other = Uuid::new_v4();
        let body = format!(r#"{{"content":"hi","post":"{other}"}}"#);

        let req: CreateCommentRequest = serde_json::from_str(&body).unwrap();
        assert_eq!(req.content, "hi");
    }
}
