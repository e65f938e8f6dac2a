//! Admin comment moderation.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use blog_core::admin::{ADMIN_PAGE_SIZE, CommentFilter, DateFilter};
use blog_core::domain::Comment;
use blog_core::error::DomainError;
use blog_core::forms::{CleanForm, CommentForm};
use blog_core::pagination::PageRequest;
use blog_shared::ApiResponse;
use blog_shared::dto::{CommentResponse, CommentUpdateRequest};

use super::page_response;
use crate::middleware::auth::StaffIdentity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CommentListQuery {
    pub active: Option<bool>,
    pub created: Option<DateFilter>,
    pub updated: Option<DateFilter>,
    pub q: Option<String>,
    pub page: Option<String>,
}

fn to_response(comment: Comment) -> CommentResponse {
    CommentResponse {
        id: comment.id.to_string(),
        post_id: comment.post_id.to_string(),
        author_id: comment.author_id.to_string(),
        body: comment.body,
        active: comment.active,
        created_at: comment.created_at.to_rfc3339(),
        updated_at: comment.updated_at.to_rfc3339(),
    }
}

/// GET /admin/api/comments
pub async fn list_comments(
    state: web::Data<AppState>,
    _staff: StaffIdentity,
    query: web::Query<CommentListQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let request = PageRequest::parse(query.page.as_deref())?;
    let filter = CommentFilter {
        active: query.active,
        created: query.created,
        updated: query.updated,
        search: query.q,
    };

    let page = state
        .comments
        .admin_list(&filter, request, ADMIN_PAGE_SIZE)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(page_response(page, to_response))))
}

/// PATCH /admin/api/comments/{id}
pub async fn update_comment(
    state: web::Data<AppState>,
    staff: StaffIdentity,
    path: web::Path<Uuid>,
    body: web::Json<CommentUpdateRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let mut comment = state
        .comments
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("comment", id))?;

    let update = body.into_inner();
    if let Some(body) = update.body {
        let form = CommentForm { body }.cleaned()?;
        comment.body = form.body;
        comment.updated_at = chrono::Utc::now();
    }
    if let Some(active) = update.active {
        comment.set_active(active);
    }

    let saved = state.comments.save(comment).await?;
    tracing::info!(comment_id = %saved.id, active = saved.active, by = %staff.0.username, "Comment moderated");

    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_response(saved))))
}
