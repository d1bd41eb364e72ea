//! Application services orchestrating the repositories.

mod comments;
mod likes;
mod posts;
mod tags;

pub use comments::CommentService;
pub use likes::LikeToggler;
pub use posts::PostService;
pub use tags::TagService;

/// Number of posts returned by the top-liked listing.
pub const TOP_LIKED_LIMIT: u64 = 3;
