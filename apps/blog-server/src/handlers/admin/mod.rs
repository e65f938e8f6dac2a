//! Admin JSON API. Every route except login requires a staff token.

mod auth;
mod comments;
mod posts;

use actix_web::web;

use blog_shared::dto::PageResponse;
use blog_core::pagination::Page;

use crate::state::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/login", web::post().to(auth::login))
        .service(
            web::resource("/posts")
                .route(web::get().to(posts::list_posts))
                .route(web::post().to(posts::create_post)),
        )
        .service(
            web::resource("/posts/{id}")
                .route(web::get().to(posts::get_post))
                .route(web::put().to(posts::update_post))
                .route(web::delete().to(posts::delete_post)),
        )
        .route("/comments", web::get().to(comments::list_comments))
        .route("/comments/{id}", web::patch().to(comments::update_comment));
}

fn page_response<T, U>(page: Page<T>, f: impl FnMut(T) -> U) -> PageResponse<U> {
    let page = page.map(f);
    PageResponse {
        items: page.items,
        page: page.number,
        num_pages: page.num_pages,
        total: page.total,
    }
}

/// Drop the cached feed after posts change.
async fn invalidate_feed(state: &AppState) {
    if let Err(e) = state.cache.delete(super::FEED_CACHE_KEY).await {
        tracing::warn!("Failed to invalidate feed cache: {}", e);
    }
}
