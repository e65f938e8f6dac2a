//! Admin post management.

use actix_web::{HttpResponse, web};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use blog_core::admin::{ADMIN_PAGE_SIZE, DateFilter, DateHierarchy, PostFilter};
use blog_core::domain::{Post, PostStatus, Tag};
use blog_core::error::DomainError;
use blog_core::forms::{CleanForm, PostForm};
use blog_core::pagination::PageRequest;
use blog_shared::ApiResponse;
use blog_shared::dto::{PostRequest, PostResponse};

use super::{invalidate_feed, page_response};
use crate::middleware::auth::StaffIdentity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PostListQuery {
    pub status: Option<PostStatus>,
    pub author_id: Option<Uuid>,
    pub created: Option<DateFilter>,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub q: Option<String>,
    pub page: Option<String>,
}

impl From<PostListQuery> for PostFilter {
    fn from(query: PostListQuery) -> Self {
        PostFilter {
            status: query.status,
            author_id: query.author_id,
            created: query.created,
            publish: DateHierarchy {
                year: query.year,
                month: query.month,
                day: query.day,
            },
            search: query.q,
        }
    }
}

fn to_response(post: Post, tags: Vec<Tag>) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        url: post.absolute_url(),
        title: post.title,
        slug: post.slug,
        author_id: post.author_id.to_string(),
        body: post.body,
        status: match post.status {
            PostStatus::Draft => "draft".to_string(),
            PostStatus::Published => "published".to_string(),
        },
        publish_date: post.publish_date.to_rfc3339(),
        created_at: post.created_at.to_rfc3339(),
        updated_at: post.updated_at.to_rfc3339(),
        tags: tags.into_iter().map(|t| t.name).collect(),
    }
}

fn parse_status(raw: &str) -> AppResult<PostStatus> {
    match raw.trim().to_lowercase().as_str() {
        "draft" | "df" => Ok(PostStatus::Draft),
        "published" | "pb" => Ok(PostStatus::Published),
        other => Err(AppError::BadRequest(format!("Unknown status {}", other))),
    }
}

fn parse_uuid(raw: &str, field: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::BadRequest(format!("Invalid {}", field)))
}

/// Apply a request to `post`, returning the requested tag names.
///
/// Optional fields that are absent keep their current value.
async fn apply_request(
    state: &AppState,
    post: &mut Post,
    req: PostRequest,
) -> AppResult<Vec<String>> {
    let form = PostForm {
        title: req.title,
        slug: req.slug.unwrap_or_default(),
        body: req.body,
    }
    .cleaned()?;

    post.title = form.title;
    post.slug = form.slug;
    post.body = form.body;

    if let Some(status) = req.status.as_deref() {
        post.status = parse_status(status)?;
    }
    if let Some(raw) = req.publish_date.as_deref() {
        post.publish_date = DateTime::parse_from_rfc3339(raw)
            .map_err(|_| AppError::BadRequest("publish_date must be RFC 3339".to_string()))?
            .with_timezone(&Utc);
    }
    if let Some(raw) = req.author_id.as_deref() {
        let author_id = parse_uuid(raw, "author_id")?;
        state
            .users
            .find_by_id(author_id)
            .await?
            .ok_or_else(|| AppError::BadRequest(format!("Unknown author {}", author_id)))?;
        post.author_id = author_id;
    }

    if state
        .posts
        .slug_taken(post.publish_day(), &post.slug, Some(post.id))
        .await?
    {
        return Err(AppError::Conflict(format!(
            "Slug {} is already used on {}",
            post.slug,
            post.publish_day()
        )));
    }

    post.touch();
    Ok(req.tags)
}

async fn save_with_tags(
    state: &AppState,
    post: Post,
    tags: Vec<String>,
) -> AppResult<PostResponse> {
    let saved = state.posts.save(post).await?;
    let tags = state.tags.set_post_tags(saved.id, &tags).await?;
    Ok(to_response(saved, tags))
}

/// GET /admin/api/posts
pub async fn list_posts(
    state: web::Data<AppState>,
    _staff: StaffIdentity,
    query: web::Query<PostListQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let request = PageRequest::parse(query.page.as_deref())?;
    let filter = PostFilter::from(query);

    let page = state
        .posts
        .admin_list(&filter, request, ADMIN_PAGE_SIZE)
        .await?;

    let ids: Vec<Uuid> = page.items.iter().map(|p| p.id).collect();
    let mut tags = state.tags.tags_for_posts(&ids).await?;
    let response = page_response(page, |post| {
        let post_tags = tags.remove(&post.id).unwrap_or_default();
        to_response(post, post_tags)
    });

    Ok(HttpResponse::Ok().json(ApiResponse::ok(response)))
}

/// POST /admin/api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    staff: StaffIdentity,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let mut post = Post::new(staff.0.user_id, String::new(), String::new(), String::new());
    let tags = apply_request(&state, &mut post, body.into_inner()).await?;

    let response = save_with_tags(&state, post, tags).await?;
    invalidate_feed(&state).await;

    tracing::info!(post_id = %response.id, by = %staff.0.username, "Post created");
    Ok(HttpResponse::Created().json(ApiResponse::ok(response)))
}

async fn existing_post(state: &AppState, id: Uuid) -> AppResult<Post> {
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("post", id))?;
    Ok(post)
}

/// GET /admin/api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    _staff: StaffIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = existing_post(&state, path.into_inner()).await?;
    let tags = state.tags.tags_for_post(post.id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_response(post, tags))))
}

/// PUT /admin/api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    staff: StaffIdentity,
    path: web::Path<Uuid>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let mut post = existing_post(&state, path.into_inner()).await?;
    let tags = apply_request(&state, &mut post, body.into_inner()).await?;

    let response = save_with_tags(&state, post, tags).await?;
    invalidate_feed(&state).await;

    tracing::info!(post_id = %response.id, by = %staff.0.username, "Post updated");
    Ok(HttpResponse::Ok().json(ApiResponse::ok(response)))
}

/// DELETE /admin/api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    staff: StaffIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.posts.delete(id).await?;
    invalidate_feed(&state).await;

    tracing::info!(post_id = %id, by = %staff.0.username, "Post deleted");
    Ok(HttpResponse::Ok().json(ApiResponse::message("Post deleted")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_accepts_names_and_codes() {
        assert_eq!(parse_status("published").unwrap(), PostStatus::Published);
        assert_eq!(parse_status("DF").unwrap(), PostStatus::Draft);
        assert!(parse_status("archived").is_err());
    }

    #[test]
    fn list_query_builds_date_hierarchy() {
        let query = PostListQuery {
            status: Some(PostStatus::Published),
            author_id: None,
            created: Some(DateFilter::Today),
            year: Some(2024),
            month: Some(2),
            day: None,
            q: Some("rust".into()),
            page: None,
        };

        let filter = PostFilter::from(query);
        assert_eq!(filter.publish.year, Some(2024));
        assert_eq!(filter.publish.month, Some(2));
        assert_eq!(filter.search_term().as_deref(), Some("rust"));
    }
}
