use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, LikeState, Post, Tag};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
///
/// The `*_with_tags` methods and `toggle_like` are each applied as one atomic
/// unit by the store.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// All posts in store order.
    async fn list(&self) -> Result<Vec<Post>, RepoError>;

    /// Posts with the highest `likes_num`, descending; ties keep store order.
    async fn top_by_likes(&self, limit: u64) -> Result<Vec<Post>, RepoError>;

    /// Posts associated with the given tag.
    async fn find_by_tag(&self, tag_id: Uuid) -> Result<Vec<Post>, RepoError>;

    /// Names of the tags associated with a post, in association order.
    async fn tag_names(&self, post_id: Uuid) -> Result<Vec<String>, RepoError>;

    /// Users who currently like a post.
    async fn liked_by(&self, post_id: Uuid) -> Result<Vec<Uuid>, RepoError>;

    /// Insert a post and associate it with the named tags, creating missing
    /// tags. Repeated names are associated once.
    async fn insert_with_tags(&self, post: Post, tags: &[String]) -> Result<Post, RepoError>;

    /// Save a post's fields, drop all of its tag associations, then associate
    /// it with the named tags.
    async fn update_with_tags(&self, post: Post, tags: &[String]) -> Result<Post, RepoError>;

    /// Flip `user_id`'s like on a post and adjust `likes_num` accordingly.
    async fn toggle_like(&self, post_id: Uuid, user_id: Uuid) -> Result<LikeState, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    async fn find_by_post_id(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;

    async fn count_by_post_id(&self, post_id: Uuid) -> Result<u64, RepoError>;
}

/// Tag repository.
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Find a tag by its exact name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, RepoError>;

    /// All tags ordered by name.
    async fn list(&self) -> Result<Vec<Tag>, RepoError>;
}
