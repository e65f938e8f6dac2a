//! Post list and detail pages.

use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::Deserialize;
use tera::Context;

use blog_core::domain::Tag;
use blog_core::error::DomainError;
use blog_core::forms::{CommentForm, FormErrors};
use blog_core::pagination::PageRequest;

use super::html;
use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views::{PageView, comment_views, post_view, post_views};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
}

/// GET /
pub async fn post_list(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    render_list(&state, None, query.page.as_deref()).await
}

/// GET /tag/{tag_slug}
pub async fn post_list_by_tag(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    let tag = state
        .tags
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| DomainError::not_found("tag", &slug))?;

    render_list(&state, Some(tag), query.page.as_deref()).await
}

async fn render_list(state: &AppState, tag: Option<Tag>, page: Option<&str>) -> AppResult<HttpResponse> {
    let request = PageRequest::parse(page)?;
    let page = state
        .posts
        .list_published(
            tag.as_ref().map(|t| t.id),
            request,
            state.settings.posts_per_page,
        )
        .await?;

    let page_view = PageView::from(&page);
    let posts = post_views(state, page.items).await?;

    let mut context = Context::new();
    context.insert("posts", &posts);
    context.insert("page", &page_view);
    context.insert("tag", &tag);

    Ok(html(state.templates.render("blog/post/list.html", &context)?))
}

/// GET /{year}/{month}/{day}/{slug}
pub async fn post_detail(
    state: web::Data<AppState>,
    path: web::Path<(i32, u32, u32, String)>,
) -> AppResult<HttpResponse> {
    let (year, month, day, slug) = path.into_inner();
    let not_found = || DomainError::not_found("post", format!("{year}/{month}/{day}/{slug}"));

    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(not_found)?;
    let post = state
        .posts
        .find_published_by_date(date, &slug)
        .await?
        .ok_or_else(not_found)?;

    let comments = state.comments.active_for_post(post.id).await?;
    let similar = state
        .posts
        .similar_published(post.id, state.settings.similar_posts_limit)
        .await?;

    let mut context = Context::new();
    context.insert("comments", &comment_views(&state, comments).await?);
    context.insert("similar_posts", &post_views(&state, similar).await?);
    context.insert("post", &post_view(&state, post).await?);
    context.insert("form", &CommentForm::default());
    context.insert("errors", &FormErrors::new());

    Ok(html(state.templates.render("blog/post/detail.html", &context)?))
}
