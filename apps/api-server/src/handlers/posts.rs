//! Post handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blog_core::domain::{NewPost, PostChanges};
use blog_core::policy::Action;
use blog_core::services::TOP_LIKED_LIMIT;
use blog_shared::dto::{CreatePostRequest, UpdatePostRequest};

use super::views::{PostBody, post_bodies};
use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list().await?;
    let views = state
        .posts
        .present_all(posts, Action::List.representation())
        .await?;

    Ok(HttpResponse::Ok().json(post_bodies(views)))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let draft = NewPost {
        name: req.name,
        content: req.content,
        image: req.image,
    };

    let post = state.posts.create(identity.user_id(), draft).await?;
    let view = state
        .posts
        .present(post, Action::Create.representation())
        .await?;

    Ok(HttpResponse::Created().json(PostBody::from(view)))
}

/// GET /api/posts/likesTop3
pub async fn likes_top3(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.top_liked(TOP_LIKED_LIMIT).await?;
    let views = state
        .posts
        .present_all(posts, Action::LikesTop3.representation())
        .await?;

    Ok(HttpResponse::Ok().json(post_bodies(views)))
}

/// GET /api/posts/{id}
pub async fn get_post(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let post = state.posts.get(path.into_inner()).await?;
    let view = state
        .posts
        .present(post, Action::Retrieve.representation())
        .await?;

    Ok(HttpResponse::Ok().json(PostBody::from(view)))
}

/// PUT /api/posts/{id}
pub async fn replace_post(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    update(state, identity, path.into_inner(), body.into_inner(), Action::Update).await
}

/// PATCH /api/posts/{id}
pub async fn patch_post(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    update(
        state,
        identity,
        path.into_inner(),
        body.into_inner(),
        Action::PartialUpdate,
    )
    .await
}

async fn update(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    id: Uuid,
    req: UpdatePostRequest,
    action: Action,
) -> AppResult<HttpResponse> {
    let changes = PostChanges {
        name: req.name,
        content: req.content,
        image: req.image,
    };

    let post = state
        .posts
        .update(identity.user_id(), id, changes, action)
        .await?;
    let view = state.posts.present(post, action.representation()).await?;

    Ok(HttpResponse::Ok().json(PostBody::from(view)))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .posts
        .delete(identity.user_id(), path.into_inner())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/posts/{id}/likes
///
/// Toggles the caller's like; answers with an empty body.
pub async fn toggle_like(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .likes
        .toggle(identity.user_id(), path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().finish())
}
