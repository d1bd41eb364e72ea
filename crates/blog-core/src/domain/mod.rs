//! Domain entities - the core business objects.

mod comment;
mod hashtag;
mod post;
mod tag;
mod views;

pub use comment::Comment;
pub use hashtag::extract_hashtags;
pub use post::{LikeState, MAX_IMAGE_LEN, MAX_NAME_LEN, NewPost, Post, PostChanges};
pub use tag::Tag;
pub use views::{PostDetail, PostSummary, PostView, Representation};
