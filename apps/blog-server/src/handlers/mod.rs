//! HTTP handlers and route configuration.

mod admin;
mod comments;
mod feed;
mod health;
mod posts;
mod search;
mod share;

#[cfg(test)]
mod tests;

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blog_core::domain::Post;
use blog_core::error::DomainError;

use crate::middleware::error::AppResult;
use crate::state::AppState;

pub use feed::FEED_CACHE_KEY;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/admin/api").configure(admin::configure_routes))
        .route("/health", web::get().to(health::health_check))
        .route("/", web::get().to(posts::post_list))
        .route("/feed/", web::get().to(feed::latest_posts_feed))
        .route("/search/", web::get().to(search::post_search))
        .route("/tag/{tag_slug}", web::get().to(posts::post_list_by_tag))
        .service(
            web::resource("/{id}/share")
                .route(web::get().to(share::share_form))
                .route(web::post().to(share::share_submit)),
        )
        // POST only; other methods get 405.
        .service(web::resource("/{id}/comment").route(web::post().to(comments::post_comment)))
        .route(
            "/{year}/{month}/{day}/{slug}",
            web::get().to(posts::post_detail),
        );
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

/// A published post by id, or 404.
async fn published_post(state: &AppState, id: Uuid) -> AppResult<Post> {
    let post = state
        .posts
        .find_published(id)
        .await?
        .ok_or_else(|| DomainError::not_found("post", id))?;
    Ok(post)
}
