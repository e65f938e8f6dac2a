//! Post search.

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tera::Context;

use blog_core::forms::{CleanForm, FormErrors, SearchForm};

use super::html;
use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views::{PostView, post_views};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
struct SearchResult {
    post: PostView,
    similarity: f32,
    rank: f32,
}

/// GET /search/
pub async fn post_search(
    state: web::Data<AppState>,
    params: web::Query<SearchParams>,
) -> AppResult<HttpResponse> {
    let mut form = SearchForm::default();
    let mut errors = FormErrors::new();
    let mut query = None;
    let mut results = Vec::new();

    if let Some(raw) = params.into_inner().query {
        form.query = raw;
        match form.clone().cleaned() {
            Ok(cleaned) => {
                let hits = state
                    .posts
                    .search_published(&cleaned.query, state.settings.search_threshold)
                    .await?;
                tracing::debug!(query = %cleaned.query, hits = hits.len(), "Search completed");

                let scores: Vec<(f32, f32)> = hits.iter().map(|h| (h.similarity, h.rank)).collect();
                let views = post_views(&state, hits.into_iter().map(|h| h.post).collect()).await?;
                results = views
                    .into_iter()
                    .zip(scores)
                    .map(|(post, (similarity, rank))| SearchResult {
                        post,
                        similarity,
                        rank,
                    })
                    .collect();
                query = Some(cleaned.query.clone());
                form = cleaned;
            }
            Err(e) => errors = e,
        }
    }

    let mut context = Context::new();
    context.insert("form", &form);
    context.insert("errors", &errors);
    context.insert("query", &query);
    context.insert("results", &results);

    Ok(html(state.templates.render("blog/post/search.html", &context)?))
}
