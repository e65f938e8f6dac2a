//! Data Transfer Objects - request/response types for the admin API.

use serde::{Deserialize, Serialize};

/// Request to login to the admin API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Create or replace a post. A missing slug is derived from the title.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRequest {
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    pub body: String,
    /// `draft` or `published`; defaults to draft.
    #[serde(default)]
    pub status: Option<String>,
    /// RFC 3339 timestamp; defaults to now.
    #[serde(default)]
    pub publish_date: Option<String>,
    /// Author id; defaults to the calling staff user.
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Post as returned by the admin API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub author_id: String,
    pub body: String,
    pub status: String,
    pub publish_date: String,
    pub created_at: String,
    pub updated_at: String,
    pub url: String,
    pub tags: Vec<String>,
}

/// Moderation update of a comment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentUpdateRequest {
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub body: Option<String>,
}

/// Comment as returned by the admin API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    pub body: String,
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// One page of an admin change list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub num_pages: u64,
    pub total: u64,
}
