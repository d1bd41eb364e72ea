//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::ports::{CommentRepository, PostRepository, TagRepository};
use blog_core::services::{CommentService, LikeToggler, PostService, TagService};
use blog_infra::{DatabaseConfig, InMemoryBlogStore};

#[cfg(feature = "postgres")]
use blog_infra::DatabasePool;
#[cfg(feature = "postgres")]
use blog_infra::database::{
    PostgresCommentRepository, PostgresPostRepository, PostgresTagRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub likes: LikeToggler,
    pub comments: CommentService,
    pub tags: TagService,
    /// Name of the storage backend, reported by the health check.
    pub storage: &'static str,
}

impl AppState {
    /// Wire the services over the given repositories.
    pub fn from_repositories(
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
        tags: Arc<dyn TagRepository>,
        storage: &'static str,
    ) -> Self {
        Self {
            posts: PostService::new(posts.clone(), comments.clone()),
            likes: LikeToggler::new(posts.clone()),
            comments: CommentService::new(comments, posts.clone()),
            tags: TagService::new(tags, posts),
            storage,
        }
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryBlogStore::new());
        Self::from_repositories(store.clone(), store.clone(), store, "memory")
    }

    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        let state = match db_config {
            Some(config) => match DatabasePool::init(config).await {
                Ok(pool) => Self::from_repositories(
                    Arc::new(PostgresPostRepository::new(pool.conn.clone())),
                    Arc::new(PostgresCommentRepository::new(pool.conn.clone())),
                    Arc::new(PostgresTagRepository::new(pool.conn)),
                    "postgres",
                ),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Self::in_memory()
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let state = {
            if db_config.is_some() {
                tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
            }
            tracing::info!("Running without postgres feature - using in-memory store");
            Self::in_memory()
        };

        tracing::info!(storage = state.storage, "Application state initialized");
        state
    }
}
