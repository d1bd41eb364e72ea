use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::FieldError;

/// Longest accepted post name, in characters.
pub const MAX_NAME_LEN: usize = 255;
/// Longest accepted image reference, in characters.
pub const MAX_IMAGE_LEN: usize = 2048;

/// Post entity - a blog post whose content may embed hashtags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    /// Owner of the post.
    pub user_id: Uuid,
    pub name: String,
    pub content: String,
    /// Reference into the external blob store, usually a URL.
    pub image: Option<String>,
    /// Always equal to the number of likes recorded for the post.
    pub likes_num: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post owned by `user_id`.
    pub fn new(user_id: Uuid, draft: NewPost) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            name: draft.name,
            content: draft.content,
            image: draft.image,
            likes_num: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply client-supplied changes and bump `updated_at`.
    pub fn apply(&mut self, changes: PostChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(content) = changes.content {
            self.content = content;
        }
        if let Some(image) = changes.image {
            self.image = image;
        }
        self.updated_at = Utc::now();
    }
}

/// Fields a client supplies when creating a post.
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub name: String,
    pub content: String,
    pub image: Option<String>,
}

impl NewPost {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        validate_name(&self.name, &mut errors);
        if let Some(image) = &self.image {
            validate_image(image, &mut errors);
        }
        errors
    }
}

/// Changes to a post's mutable fields. `None` leaves a field untouched;
/// `image: Some(None)` clears the image.
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub name: Option<String>,
    pub content: Option<String>,
    pub image: Option<Option<String>>,
}

impl PostChanges {
    /// Validate the changes. A full update must carry `name` and `content`.
    pub fn validate(&self, full: bool) -> Vec<FieldError> {
        let mut errors = Vec::new();
        match &self.name {
            Some(name) => validate_name(name, &mut errors),
            None if full => errors.push(FieldError::new("name", "This field is required.")),
            None => {}
        }
        if full && self.content.is_none() {
            errors.push(FieldError::new("content", "This field is required."));
        }
        if let Some(Some(image)) = &self.image {
            validate_image(image, &mut errors);
        }
        errors
    }
}

fn validate_name(name: &str, errors: &mut Vec<FieldError>) {
    if name.trim().is_empty() {
        errors.push(FieldError::new("name", "This field may not be blank."));
    } else if name.chars().count() > MAX_NAME_LEN {
        errors.push(FieldError::new(
            "name",
            format!("Ensure this field has no more than {MAX_NAME_LEN} characters."),
        ));
    }
}

fn validate_image(image: &str, errors: &mut Vec<FieldError>) {
    if image.chars().count() > MAX_IMAGE_LEN {
        errors.push(FieldError::new(
            "image",
            format!("Ensure this field has no more than {MAX_IMAGE_LEN} characters."),
        ));
    }
}

/// Result of a like toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeState {
    /// Whether the principal likes the post after the toggle.
    pub liked: bool,
    pub likes_num: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> NewPost {
        NewPost {
            name: name.to_string(),
            content: "body".to_string(),
            image: None,
        }
    }

    #[test]
    fn test_new_post_starts_without_likes() {
        let owner = Uuid::new_v4();
        let post = Post::new(owner, draft("first"));

        assert_eq!(post.user_id, owner);
        assert_eq!(post.likes_num, 0);
        assert_eq!(post.created_at, post.updated_at);
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let errors = draft("   ").validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "name");
    }

    #[test]
    fn test_full_update_requires_name_and_content() {
        let errors = PostChanges::default().validate(true);
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["name", "content"]);

        assert!(PostChanges::default().validate(false).is_empty());
    }

    #[test]
    fn test_apply_keeps_untouched_fields() {
        let mut post = Post::new(Uuid::new_v4(), draft("keep"));
        post.image = Some("https://cdn.example.com/a.png".to_string());

        post.apply(PostChanges {
            content: Some("new body".to_string()),
            ..Default::default()
        });

        assert_eq!(post.name, "keep");
        assert_eq!(post.content, "new body");
        assert!(post.image.is_some());

        post.apply(PostChanges {
            image: Some(None),
            ..Default::default()
        });
        assert!(post.image.is_none());
    }
}
