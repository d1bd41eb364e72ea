//! HTTP handlers and route configuration.

mod auth;
mod comments;
mod health;
mod posts;
mod tags;
mod views;


use std::sync::Arc;

use actix_web::web;

use blog_core::ports::TokenService;

use crate::middleware::error::{json_error_handler, path_error_handler};
use crate::state::AppState;

/// Register application data and routes.
pub fn configure_app(
    state: AppState,
    tokens: Arc<dyn TokenService>,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(state))
            .app_data(web::Data::new(tokens))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::PathConfig::default().error_handler(path_error_handler))
            .configure(configure_routes);
    }
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .route("/auth/me", web::get().to(auth::me))
            // Posts; the static segment must precede `{id}`
            .service(
                web::resource("/posts")
                    .route(web::get().to(posts::list_posts))
                    .route(web::post().to(posts::create_post)),
            )
            .route("/posts/likesTop3", web::get().to(posts::likes_top3))
            .service(
                web::resource("/posts/{id}")
                    .route(web::get().to(posts::get_post))
                    .route(web::put().to(posts::replace_post))
                    .route(web::patch().to(posts::patch_post))
                    .route(web::delete().to(posts::delete_post)),
            )
            .route("/posts/{id}/likes", web::post().to(posts::toggle_like))
            .service(
                web::resource("/posts/{post_id}/comments")
                    .route(web::get().to(comments::list_comments))
                    .route(web::post().to(comments::create_comment)),
            )
            // Comments
            .service(
                web::resource("/comments/{id}")
                    .route(web::get().to(comments::get_comment))
                    .route(web::put().to(comments::replace_comment))
                    .route(web::patch().to(comments::patch_comment))
                    .route(web::delete().to(comments::delete_comment)),
            )
            // Tags
            .route("/tags", web::get().to(tags::list_tags))
            .route("/tags/{name}", web::get().to(tags::posts_for_tag)),
    );
}
