use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::admin::{CommentFilter, PostFilter};
use crate::domain::{Comment, Post, Tag, User};
use crate::error::RepoError;
use crate::pagination::{Page, PageRequest};
use crate::search::SearchHit;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Load several users at once, e.g. the authors shown on a list page.
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError>;
}

/// Post repository. Every `*_published` method only ever sees published posts.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    async fn find_published(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// The published post with `slug` whose publish date falls on `day` (UTC).
    async fn find_published_by_date(
        &self,
        day: NaiveDate,
        slug: &str,
    ) -> Result<Option<Post>, RepoError>;

    /// Newest first, optionally restricted to posts carrying `tag_id`.
    async fn list_published(
        &self,
        tag_id: Option<Uuid>,
        page: PageRequest,
        per_page: u64,
    ) -> Result<Page<Post>, RepoError>;

    async fn latest_published(&self, limit: u64) -> Result<Vec<Post>, RepoError>;

    /// Published posts other than `post_id` sharing tags with it, most shared tags first.
    async fn similar_published(&self, post_id: Uuid, limit: u64) -> Result<Vec<Post>, RepoError>;

    /// Trigram search on the title with full-text rank, most similar first.
    async fn search_published(&self, query: &str, threshold: f32)
    -> Result<Vec<SearchHit>, RepoError>;

    /// Whether another post already uses `slug` on `day`.
    async fn slug_taken(
        &self,
        day: NaiveDate,
        slug: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, RepoError>;

    /// Admin change list, ordered by status then publish date.
    async fn admin_list(
        &self,
        filter: &PostFilter,
        page: PageRequest,
        per_page: u64,
    ) -> Result<Page<Post>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Active comments of a post, oldest first.
    async fn active_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;

    /// Admin change list, ordered by creation time.
    async fn admin_list(
        &self,
        filter: &CommentFilter,
        page: PageRequest,
        per_page: u64,
    ) -> Result<Page<Comment>, RepoError>;
}

/// Tag storage and the post/tag association.
#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError>;

    async fn tags_for_post(&self, post_id: Uuid) -> Result<Vec<Tag>, RepoError>;

    async fn tags_for_posts(&self, post_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<Tag>>, RepoError>;

    /// Replace the tags of a post, creating unknown tags by name.
    async fn set_post_tags(&self, post_id: Uuid, names: &[String]) -> Result<Vec<Tag>, RepoError>;
}
