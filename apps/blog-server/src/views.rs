//! Template view models built from domain entities.

use std::collections::HashMap;

use actix_web::HttpRequest;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use blog_core::domain::{Comment, Post, Tag};
use blog_core::pagination::Page;

use crate::middleware::error::AppResult;
use crate::state::AppState;

fn display_date(at: DateTime<Utc>) -> String {
    at.format("%b %-d, %Y").to_string()
}

/// A post as the templates see it.
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub url: String,
    pub author: String,
    pub publish_date: String,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    pub id: Uuid,
    pub author: String,
    pub body: String,
    pub created: String,
}

/// Page links of a list view.
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub number: u64,
    pub num_pages: u64,
    pub previous: Option<u64>,
    pub next: Option<u64>,
}

impl<T> From<&Page<T>> for PageView {
    fn from(page: &Page<T>) -> Self {
        Self {
            number: page.number,
            num_pages: page.num_pages,
            previous: page.previous_page_number(),
            next: page.next_page_number(),
        }
    }
}

async fn usernames(state: &AppState, ids: Vec<Uuid>) -> AppResult<HashMap<Uuid, String>> {
    Ok(state
        .users
        .find_by_ids(&ids)
        .await?
        .into_iter()
        .map(|u| (u.id, u.username))
        .collect())
}

/// Decorate posts with author names and tags, keeping their order.
pub async fn post_views(state: &AppState, posts: Vec<Post>) -> AppResult<Vec<PostView>> {
    let ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();
    let mut tags = state.tags.tags_for_posts(&ids).await?;
    let authors = usernames(state, posts.iter().map(|p| p.author_id).collect()).await?;

    Ok(posts
        .into_iter()
        .map(|post| PostView {
            id: post.id,
            url: post.absolute_url(),
            author: authors.get(&post.author_id).cloned().unwrap_or_default(),
            publish_date: display_date(post.publish_date),
            tags: tags.remove(&post.id).unwrap_or_default(),
            title: post.title,
            body: post.body,
        })
        .collect())
}

pub async fn post_view(state: &AppState, post: Post) -> AppResult<PostView> {
    let mut views = post_views(state, vec![post]).await?;
    views
        .pop()
        .ok_or_else(|| crate::middleware::error::AppError::Internal("post view lost".into()))
}

pub async fn comment_views(state: &AppState, comments: Vec<Comment>) -> AppResult<Vec<CommentView>> {
    let authors = usernames(state, comments.iter().map(|c| c.author_id).collect()).await?;

    Ok(comments
        .into_iter()
        .map(|comment| CommentView {
            id: comment.id,
            author: authors.get(&comment.author_id).cloned().unwrap_or_default(),
            body: comment.body,
            created: display_date(comment.created_at),
        })
        .collect())
}

/// `scheme://host` of the current request.
pub fn site_root(req: &HttpRequest) -> String {
    let info = req.connection_info();
    format!("{}://{}", info.scheme(), info.host())
}

/// Absolute URL of a path on this site.
pub fn absolute_uri(req: &HttpRequest, path: &str) -> String {
    format!("{}{}", site_root(req), path)
}
