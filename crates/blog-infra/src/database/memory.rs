//! In-memory blog store - used as fallback when no database is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::{Comment, LikeState, Post, Tag};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, CommentRepository, PostRepository, TagRepository};

#[derive(Default)]
struct Tables {
    /// Posts in insertion order.
    posts: Vec<Post>,
    comments: Vec<Comment>,
    tags: Vec<Tag>,
    /// Post id -> tag ids in association order.
    post_tags: HashMap<Uuid, Vec<Uuid>>,
    /// Post id -> users liking it.
    likes: HashMap<Uuid, Vec<Uuid>>,
}

impl Tables {
    fn post_mut(&mut self, id: Uuid) -> Option<&mut Post> {
        self.posts.iter_mut().find(|p| p.id == id)
    }

    fn get_or_create_tag(&mut self, name: &str) -> Uuid {
        if let Some(tag) = self.tags.iter().find(|t| t.name == name) {
            return tag.id;
        }
        let tag = Tag::new(name);
        let id = tag.id;
        self.tags.push(tag);
        id
    }

    fn link_tags(&mut self, post_id: Uuid, names: &[String]) {
        for name in names {
            let tag_id = self.get_or_create_tag(name);
            let links = self.post_tags.entry(post_id).or_default();
            if !links.contains(&tag_id) {
                links.push(tag_id);
            }
        }
    }
}

/// Store holding posts, comments, tags and their relations in one lock.
///
/// Every mutation runs under a single write guard, which makes the
/// multi-step operations of [`PostRepository`] atomic.
/// Note: Data is lost on process restart.
pub struct InMemoryBlogStore {
    tables: RwLock<Tables>,
}

impl InMemoryBlogStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }
}

impl Default for InMemoryBlogStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryBlogStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        self.insert_with_tags(post, &[]).await
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        let slot = tables.post_mut(post.id).ok_or(RepoError::NotFound)?;
        *slot = post.clone();
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let before = tables.posts.len();
        tables.posts.retain(|p| p.id != id);
        if tables.posts.len() == before {
            return Err(RepoError::NotFound);
        }

        // Cascade to owned rows; tags themselves stay.
        tables.comments.retain(|c| c.post_id != id);
        tables.post_tags.remove(&id);
        tables.likes.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryBlogStore {
    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.tables.read().await.posts.clone())
    }

    async fn top_by_likes(&self, limit: u64) -> Result<Vec<Post>, RepoError> {
        let mut posts = self.tables.read().await.posts.clone();
        // Stable sort keeps insertion order among equal counts.
        posts.sort_by(|a, b| b.likes_num.cmp(&a.likes_num));
        posts.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(posts)
    }

    async fn find_by_tag(&self, tag_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .posts
            .iter()
            .filter(|p| {
                tables
                    .post_tags
                    .get(&p.id)
                    .is_some_and(|links| links.contains(&tag_id))
            })
            .cloned()
            .collect())
    }

    async fn tag_names(&self, post_id: Uuid) -> Result<Vec<String>, RepoError> {
        let tables = self.tables.read().await;
        let Some(links) = tables.post_tags.get(&post_id) else {
            return Ok(Vec::new());
        };
        Ok(links
            .iter()
            .filter_map(|id| tables.tags.iter().find(|t| t.id == *id))
            .map(|t| t.name.clone())
            .collect())
    }

    async fn liked_by(&self, post_id: Uuid) -> Result<Vec<Uuid>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.likes.get(&post_id).cloned().unwrap_or_default())
    }

    async fn insert_with_tags(&self, post: Post, tags: &[String]) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        if tables.posts.iter().any(|p| p.id == post.id) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        tables.posts.push(post.clone());
        tables.link_tags(post.id, tags);
        Ok(post)
    }

    async fn update_with_tags(&self, post: Post, tags: &[String]) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        // Only client-editable columns; the counter belongs to toggle_like.
        let slot = tables.post_mut(post.id).ok_or(RepoError::NotFound)?;
        slot.name = post.name;
        slot.content = post.content;
        slot.image = post.image;
        slot.updated_at = post.updated_at;
        let stored = slot.clone();

        tables.post_tags.remove(&stored.id);
        tables.link_tags(stored.id, tags);
        Ok(stored)
    }

    async fn toggle_like(&self, post_id: Uuid, user_id: Uuid) -> Result<LikeState, RepoError> {
        let mut tables = self.tables.write().await;
        if tables.post_mut(post_id).is_none() {
            return Err(RepoError::NotFound);
        }

        let likers = tables.likes.entry(post_id).or_default();
        let liked = match likers.iter().position(|u| *u == user_id) {
            Some(idx) => {
                likers.remove(idx);
                false
            }
            None => {
                likers.push(user_id);
                true
            }
        };

        let post = tables.post_mut(post_id).ok_or(RepoError::NotFound)?;
        post.likes_num += if liked { 1 } else { -1 };
        Ok(LikeState {
            liked,
            likes_num: post.likes_num,
        })
    }
}

#[async_trait]
impl BaseRepository<Comment, Uuid> for InMemoryBlogStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.comments.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.posts.iter().any(|p| p.id == comment.post_id) {
            return Err(RepoError::Constraint(
                "Comment references a missing post".to_string(),
            ));
        }
        tables.comments.push(comment.clone());
        Ok(comment)
    }

    async fn update(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut tables = self.tables.write().await;
        let slot = tables
            .comments
            .iter_mut()
            .find(|c| c.id == comment.id)
            .ok_or(RepoError::NotFound)?;
        *slot = comment.clone();
        Ok(comment)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let before = tables.comments.len();
        tables.comments.retain(|c| c.id != id);
        if tables.comments.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for InMemoryBlogStore {
    async fn find_by_post_id(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn count_by_post_id(&self, post_id: Uuid) -> Result<u64, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.comments.iter().filter(|c| c.post_id == post_id).count() as u64)
    }
}

#[async_trait]
impl TagRepository for InMemoryBlogStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.tags.iter().find(|t| t.name == name).cloned())
    }

    async fn list(&self) -> Result<Vec<Tag>, RepoError> {
        let mut tags = self.tables.read().await.tags.clone();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use blog_core::DomainError;
    use blog_core::domain::{NewPost, PostChanges, PostView, Representation};
    use blog_core::policy::Action;
    use blog_core::services::{CommentService, LikeToggler, PostService, TagService};

    use super::*;

    struct Harness {
        store: Arc<InMemoryBlogStore>,
        posts: PostService,
        likes: LikeToggler,
        comments: CommentService,
        tags: TagService,
    }

    fn harness() -> Harness {
        let store = Arc::new(InMemoryBlogStore::new());
        Harness {
            posts: PostService::new(store.clone(), store.clone()),
            likes: LikeToggler::new(store.clone()),
            comments: CommentService::new(store.clone(), store.clone()),
            tags: TagService::new(store.clone(), store.clone()),
            store,
        }
    }

    fn draft(content: &str) -> NewPost {
        NewPost {
            name: "post".to_string(),
            content: content.to_string(),
            image: None,
        }
    }

    async fn tag_names(h: &Harness, post_id: Uuid) -> Vec<String> {
        PostRepository::tag_names(h.store.as_ref(), post_id)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_associates_hashtags_in_order() {
        let h = harness();
        let owner = Uuid::new_v4();

        let post = h
            .posts
            .create(Some(owner), draft("hello #foo #bar"))
            .await
            .unwrap();

        assert_eq!(tag_names(&h, post.id).await, vec!["foo", "bar"]);
    }

    #[tokio::test]
    async fn test_repeated_hashtag_creates_one_tag() {
        let h = harness();

        let post = h
            .posts
            .create(Some(Uuid::new_v4()), draft("#x #x"))
            .await
            .unwrap();

        assert_eq!(tag_names(&h, post.id).await, vec!["x"]);
        let all = h.tags.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "x");
    }

    #[tokio::test]
    async fn test_tags_are_shared_between_posts() {
        let h = harness();
        let owner = Some(Uuid::new_v4());

        h.posts.create(owner, draft("#rust")).await.unwrap();
        h.posts.create(owner, draft("more #rust")).await.unwrap();

        assert_eq!(h.tags.list().await.unwrap().len(), 1);
        assert_eq!(h.tags.posts_for_tag("rust").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_replaces_tags() {
        let h = harness();
        let owner = Some(Uuid::new_v4());
        let post = h.posts.create(owner, draft("#a")).await.unwrap();

        let changes = PostChanges {
            content: Some("#b".to_string()),
            ..Default::default()
        };
        h.posts
            .update(owner, post.id, changes, Action::PartialUpdate)
            .await
            .unwrap();

        assert_eq!(tag_names(&h, post.id).await, vec!["b"]);
        // The orphaned tag is kept but no longer points at the post.
        assert!(h.tags.posts_for_tag("a").await.unwrap().is_empty());
        let names: Vec<_> = h.tags.list().await.unwrap().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_update_without_content_change_keeps_tags() {
        let h = harness();
        let owner = Some(Uuid::new_v4());
        let post = h.posts.create(owner, draft("#keep")).await.unwrap();

        let changes = PostChanges {
            name: Some("renamed".to_string()),
            ..Default::default()
        };
        let updated = h
            .posts
            .update(owner, post.id, changes, Action::PartialUpdate)
            .await
            .unwrap();

        assert_eq!(updated.name, "renamed");
        assert!(updated.updated_at >= post.updated_at);
        assert_eq!(tag_names(&h, post.id).await, vec!["keep"]);
    }

    #[tokio::test]
    async fn test_full_update_requires_all_fields() {
        let h = harness();
        let owner = Some(Uuid::new_v4());
        let post = h.posts.create(owner, draft("text")).await.unwrap();

        let changes = PostChanges {
            content: Some("only content".to_string()),
            ..Default::default()
        };
        let result = h.posts.update(owner, post.id, changes, Action::Update).await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_non_owner_cannot_modify_post() {
        let h = harness();
        let owner = Some(Uuid::new_v4());
        let stranger = Some(Uuid::new_v4());
        let post = h.posts.create(owner, draft("mine")).await.unwrap();

        let changes = PostChanges {
            name: Some("hijacked".to_string()),
            ..Default::default()
        };
        let result = h
            .posts
            .update(stranger, post.id, changes.clone(), Action::PartialUpdate)
            .await;
        assert!(matches!(result, Err(DomainError::Forbidden)));

        let result = h.posts.delete(stranger, post.id).await;
        assert!(matches!(result, Err(DomainError::Forbidden)));

        let result = h.posts.delete(None, post.id).await;
        assert!(matches!(result, Err(DomainError::Unauthenticated)));

        h.posts
            .update(owner, post.id, changes, Action::PartialUpdate)
            .await
            .unwrap();
        h.posts.delete(owner, post.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_requires_principal_and_valid_name() {
        let h = harness();

        let result = h.posts.create(None, draft("anon")).await;
        assert!(matches!(result, Err(DomainError::Unauthenticated)));

        let blank = NewPost {
            name: " ".to_string(),
            ..draft("body")
        };
        let result = h.posts.create(Some(Uuid::new_v4()), blank).await;
        assert!(matches!(result, Err(DomainError::Validation(errors)) if errors[0].field == "name"));
    }

    #[tokio::test]
    async fn test_like_toggle_round_trip() {
        let h = harness();
        let owner = Uuid::new_v4();
        let post = h.posts.create(Some(owner), draft("like me")).await.unwrap();

        let state = h.likes.toggle(Some(owner), post.id).await.unwrap();
        assert!(state.liked);
        assert_eq!(state.likes_num, 1);
        assert_eq!(PostRepository::liked_by(h.store.as_ref(), post.id).await.unwrap(), vec![owner]);

        let state = h.likes.toggle(Some(owner), post.id).await.unwrap();
        assert!(!state.liked);
        assert_eq!(state.likes_num, 0);
        assert!(PostRepository::liked_by(h.store.as_ref(), post.id).await.unwrap().is_empty());
        assert_eq!(h.posts.get(post.id).await.unwrap().likes_num, 0);
    }

    #[tokio::test]
    async fn test_update_from_stale_copy_keeps_like_count() {
        let h = harness();
        let owner = Uuid::new_v4();
        let post = h.posts.create(Some(owner), draft("#a")).await.unwrap();

        let mut stale = h.posts.get(post.id).await.unwrap();
        h.store.toggle_like(post.id, owner).await.unwrap();

        stale.apply(PostChanges {
            content: Some("#b".to_string()),
            ..PostChanges::default()
        });
        let updated = h.store.update_with_tags(stale, &["b".to_string()]).await.unwrap();

        assert_eq!(updated.likes_num, 1);
        assert_eq!(updated.content, "#b");
        let stored = h.posts.get(post.id).await.unwrap();
        assert_eq!(stored.likes_num, 1);
        assert_eq!(stored.user_id, owner);
        assert_eq!(stored.created_at, post.created_at);
        assert_eq!(
            PostRepository::liked_by(h.store.as_ref(), post.id).await.unwrap().len(),
            1
        );
        assert_eq!(tag_names(&h, post.id).await, vec!["b"]);
    }

    #[tokio::test]
    async fn test_like_by_non_owner_is_forbidden() {
        let h = harness();
        let post = h
            .posts
            .create(Some(Uuid::new_v4()), draft("not yours"))
            .await
            .unwrap();

        let result = h.likes.toggle(Some(Uuid::new_v4()), post.id).await;
        assert!(matches!(result, Err(DomainError::Forbidden)));

        let result = h.likes.toggle(None, post.id).await;
        assert!(matches!(result, Err(DomainError::Unauthenticated)));

        let result = h.likes.toggle(Some(Uuid::new_v4()), Uuid::new_v4()).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_likes_are_not_lost() {
        let store = Arc::new(InMemoryBlogStore::new());
        let post = Post::new(Uuid::new_v4(), draft("popular"));
        let post_id = post.id;
        store.insert_with_tags(post, &[]).await.unwrap();

        let handles: Vec<_> = (0..64)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.toggle_like(post_id, Uuid::new_v4()).await })
            })
            .collect();
        for result in futures::future::join_all(handles).await {
            result.unwrap().unwrap();
        }

        let post = BaseRepository::<Post, Uuid>::find_by_id(store.as_ref(), post_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(post.likes_num, 64);
        assert_eq!(store.liked_by(post_id).await.unwrap().len(), 64);
    }

    #[tokio::test]
    async fn test_top_liked_orders_by_likes() {
        let h = harness();
        let owner = Some(Uuid::new_v4());

        for likes in [5, 1, 9, 3] {
            let post = h.posts.create(owner, draft("ranked")).await.unwrap();
            for _ in 0..likes {
                h.store.toggle_like(post.id, Uuid::new_v4()).await.unwrap();
            }
        }

        let top: Vec<_> = h
            .posts
            .top_liked(3)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.likes_num)
            .collect();
        assert_eq!(top, vec![9, 5, 3]);
    }

    #[tokio::test]
    async fn test_tag_lookup() {
        let h = harness();
        let owner = Some(Uuid::new_v4());
        let tagged = h.posts.create(owner, draft("#news today")).await.unwrap();
        h.posts.create(owner, draft("#sports")).await.unwrap();
        h.posts.create(owner, draft("untagged")).await.unwrap();

        let posts = h.tags.posts_for_tag("news").await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, tagged.id);

        let result = h.tags.posts_for_tag("missing").await;
        assert!(matches!(
            result,
            Err(DomainError::NotFound { entity_type: "Tag", .. })
        ));
        // Lookup is exact, no case folding.
        assert!(h.tags.posts_for_tag("News").await.is_err());
    }

    #[tokio::test]
    async fn test_comments_are_scoped_to_post() {
        let h = harness();
        let author = Some(Uuid::new_v4());
        let first = h.posts.create(author, draft("one")).await.unwrap();
        let second = h.posts.create(author, draft("two")).await.unwrap();

        let commenter = Uuid::new_v4();
        let comment = h
            .comments
            .create(Some(commenter), first.id, "nice".to_string())
            .await
            .unwrap();
        assert_eq!(comment.post_id, first.id);
        assert_eq!(comment.user_id, commenter);

        assert_eq!(h.comments.list_for_post(first.id).await.unwrap().len(), 1);
        assert!(h.comments.list_for_post(second.id).await.unwrap().is_empty());
        assert!(h.comments.list_for_post(Uuid::new_v4()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_comment_on_missing_post_is_not_found() {
        let h = harness();

        let result = h
            .comments
            .create(Some(Uuid::new_v4()), Uuid::new_v4(), "hello".to_string())
            .await;
        assert!(matches!(
            result,
            Err(DomainError::NotFound { entity_type: "Post", .. })
        ));

        let result = h.comments.create(None, Uuid::new_v4(), "hello".to_string()).await;
        assert!(matches!(result, Err(DomainError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_comment_writes_are_owner_only() {
        let h = harness();
        let post = h
            .posts
            .create(Some(Uuid::new_v4()), draft("thread"))
            .await
            .unwrap();
        let author = Some(Uuid::new_v4());
        let stranger = Some(Uuid::new_v4());
        let comment = h
            .comments
            .create(author, post.id, "first".to_string())
            .await
            .unwrap();

        let result = h
            .comments
            .update(stranger, comment.id, Some("edited".to_string()), Action::PartialUpdate)
            .await;
        assert!(matches!(result, Err(DomainError::Forbidden)));
        assert!(matches!(
            h.comments.delete(stranger, comment.id).await,
            Err(DomainError::Forbidden)
        ));

        let edited = h
            .comments
            .update(author, comment.id, Some("edited".to_string()), Action::PartialUpdate)
            .await
            .unwrap();
        assert_eq!(edited.content, "edited");
        assert_eq!(edited.post_id, post.id);

        h.comments.delete(author, comment.id).await.unwrap();
        assert!(h.comments.get(comment.id).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_post_cascades_but_keeps_tags() {
        let h = harness();
        let owner = Uuid::new_v4();
        let post = h.posts.create(Some(owner), draft("#gone")).await.unwrap();
        h.comments
            .create(Some(Uuid::new_v4()), post.id, "bye".to_string())
            .await
            .unwrap();
        h.likes.toggle(Some(owner), post.id).await.unwrap();

        h.posts.delete(Some(owner), post.id).await.unwrap();

        assert!(matches!(
            h.posts.get(post.id).await,
            Err(DomainError::NotFound { .. })
        ));
        assert_eq!(h.store.count_by_post_id(post.id).await.unwrap(), 0);
        assert!(h.store.liked_by(post.id).await.unwrap().is_empty());
        assert!(TagRepository::find_by_name(h.store.as_ref(), "gone").await.unwrap().is_some());
        assert!(h.tags.posts_for_tag("gone").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_present_full_and_compact() {
        let h = harness();
        let owner = Uuid::new_v4();
        let post = h
            .posts
            .create(Some(owner), draft("#one #two"))
            .await
            .unwrap();
        h.comments
            .create(Some(Uuid::new_v4()), post.id, "a".to_string())
            .await
            .unwrap();
        h.comments
            .create(Some(Uuid::new_v4()), post.id, "b".to_string())
            .await
            .unwrap();
        h.likes.toggle(Some(owner), post.id).await.unwrap();
        let post = h.posts.get(post.id).await.unwrap();

        match h.posts.present(post.clone(), Representation::Full).await.unwrap() {
            PostView::Full(detail) => {
                assert_eq!(detail.tags, vec!["one", "two"]);
                assert_eq!(detail.comments.len(), 2);
                assert_eq!(detail.liked_by, vec![owner]);
                assert_eq!(detail.post.likes_num, 1);
            }
            PostView::Compact(_) => panic!("expected full view"),
        }

        match h.posts.present(post, Representation::Compact).await.unwrap() {
            PostView::Compact(summary) => {
                assert_eq!(summary.comments_cnt, 2);
                assert_eq!(summary.tags, vec!["one", "two"]);
            }
            PostView::Full(_) => panic!("expected compact view"),
        }
    }
}
