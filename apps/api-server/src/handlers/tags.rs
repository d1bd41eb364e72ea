//! Tag handlers. Tags are public.

use actix_web::{HttpResponse, web};

use blog_core::policy::Action;

use super::views::{post_bodies, tag_body};
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/tags
pub async fn list_tags(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let tags = state.tags.list().await?;
    Ok(HttpResponse::Ok().json(tags.into_iter().map(tag_body).collect::<Vec<_>>()))
}

/// GET /api/tags/{name}
///
/// Posts carrying the tag, in full representation.
pub async fn posts_for_tag(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let posts = state.tags.posts_for_tag(&path.into_inner()).await?;
    let views = state
        .posts
        .present_all(posts, Action::Retrieve.representation())
        .await?;

    Ok(HttpResponse::Ok().json(post_bodies(views)))
}
