//! Comment handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blog_core::policy::Action;
use blog_shared::dto::{CreateCommentRequest, UpdateCommentRequest};

use super::views::comment_body;
use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/posts/{post_id}/comments
pub async fn list_comments(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let comments = state.comments.list_for_post(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(comments.into_iter().map(comment_body).collect::<Vec<_>>()))
}

/// POST /api/posts/{post_id}/comments
///
/// The parent post is always the one in the path.
pub async fn create_comment(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let comment = state
        .comments
        .create(identity.user_id(), path.into_inner(), body.into_inner().content)
        .await?;

    Ok(HttpResponse::Created().json(comment_body(comment)))
}

/// GET /api/comments/{id}
pub async fn get_comment(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let comment = state.comments.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(comment_body(comment)))
}

/// PUT /api/comments/{id}
pub async fn replace_comment(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
    body: web::Json<UpdateCommentRequest>,
) -> AppResult<HttpResponse> {
    update(state, identity, path.into_inner(), body.into_inner(), Action::Update).await
}

/// PATCH /api/comments/{id}
pub async fn patch_comment(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
    body: web::Json<UpdateCommentRequest>,
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
    req: UpdateCommentRequest,
    action: Action,
) -> AppResult<HttpResponse> {
    let comment = state
        .comments
        .update(identity.user_id(), id, req.content, action)
        .await?;

    Ok(HttpResponse::Ok().json(comment_body(comment)))
}

/// DELETE /api/comments/{id}
pub async fn delete_comment(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .comments
        .delete(identity.user_id(), path.into_inner())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
