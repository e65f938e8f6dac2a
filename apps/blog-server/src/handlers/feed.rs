//! RSS feed of the latest posts.

use actix_web::{HttpRequest, HttpResponse, web};
use rss::{Channel, Guid, Item};

use blog_core::domain::Post;

use crate::content::markdown_excerpt;
use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views::site_root;

const FEED_TITLE: &str = "My blog";
const FEED_DESCRIPTION: &str = "New posts of my blog.";
const DESCRIPTION_WORDS: usize = 30;

/// Cache key of the latest published posts. Links are rendered per request,
/// so one entry serves every host the site is reached through.
pub const FEED_CACHE_KEY: &str = "feed:latest";

fn rss_response(xml: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/rss+xml; charset=utf-8")
        .body(xml)
}

/// Build the channel; links are absolute under `root`.
pub fn build_channel(root: &str, posts: &[Post]) -> Channel {
    let items: Vec<Item> = posts
        .iter()
        .map(|post| {
            let link = format!("{}{}", root, post.absolute_url());

            let mut guid = Guid::default();
            guid.set_value(link.clone());
            guid.set_permalink(true);

            let mut item = Item::default();
            item.set_title(post.title.clone());
            item.set_link(link);
            item.set_guid(guid);
            item.set_pub_date(post.publish_date.to_rfc2822());
            item.set_description(markdown_excerpt(&post.body, DESCRIPTION_WORDS));
            item
        })
        .collect();

    let mut channel = Channel::default();
    channel.set_title(FEED_TITLE);
    channel.set_link(format!("{root}/"));
    channel.set_description(FEED_DESCRIPTION);
    channel.set_items(items);
    channel
}

/// GET /feed/
pub async fn latest_posts_feed(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let posts = latest_posts(&state).await?;
    let xml = build_channel(&site_root(&req), &posts).to_string();
    Ok(rss_response(xml))
}

async fn latest_posts(state: &AppState) -> AppResult<Vec<Post>> {
    if let Some(cached) = state.cache.get(FEED_CACHE_KEY).await {
        match serde_json::from_str(&cached) {
            Ok(posts) => {
                tracing::debug!("Feed posts served from cache");
                return Ok(posts);
            }
            Err(e) => tracing::warn!("Discarding unreadable feed cache entry: {}", e),
        }
    }

    let posts = state.posts.latest_published(state.settings.feed_items).await?;

    match serde_json::to_string(&posts) {
        Ok(json) => {
            if let Err(e) = state
                .cache
                .set(FEED_CACHE_KEY, &json, Some(state.settings.feed_cache_ttl))
                .await
            {
                tracing::warn!("Failed to cache feed: {}", e);
            }
        }
        Err(e) => tracing::warn!("Failed to serialize feed posts: {}", e),
    }

    Ok(posts)
}
