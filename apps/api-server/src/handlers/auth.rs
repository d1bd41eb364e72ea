//! Principal introspection.

use actix_web::HttpResponse;

use blog_shared::dto::PrincipalResponse;

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;

/// GET /api/auth/me - Protected route
pub async fn me(identity: Identity) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(PrincipalResponse {
        user_id: identity.user_id,
        roles: identity.roles,
        expires_at: identity.expires_at,
    }))
}
