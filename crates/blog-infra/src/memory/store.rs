//! A single in-process store implementing every repository port.
//!
//! It enforces the same constraints as the PostgreSQL schema: unique
//! usernames, unique tag names and slugs, one slug per publish day, and
//! comments that reference an existing post. Deleting a post removes its
//! comments and tag links; deleting a user removes their posts and comments.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::admin::{CommentFilter, PostFilter};
use blog_core::domain::{Comment, Post, Tag, User, normalize_tag_names, rank_by_shared_tags};
use blog_core::error::RepoError;
use blog_core::pagination::{Page, PageRequest};
use blog_core::ports::{
    BaseRepository, CommentRepository, PostRepository, TagRepository, UserRepository,
};
use blog_core::search::{SearchHit, score_posts};

#[derive(Default)]
struct State {
    users: HashMap<Uuid, User>,
    posts: HashMap<Uuid, Post>,
    comments: HashMap<Uuid, Comment>,
    tags: HashMap<Uuid, Tag>,
    /// (post_id, tag_id) pairs.
    links: Vec<(Uuid, Uuid)>,
}

impl State {
    fn published(&self) -> impl Iterator<Item = &Post> {
        self.posts.values().filter(|p| p.is_published())
    }

    fn tag_ids_of(&self, post_id: Uuid) -> Vec<Uuid> {
        self.links
            .iter()
            .filter(|(p, _)| *p == post_id)
            .map(|(_, t)| *t)
            .collect()
    }

    fn slug_taken(&self, day: NaiveDate, slug: &str, exclude: Option<Uuid>) -> bool {
        self.posts.values().any(|p| {
            Some(p.id) != exclude && p.slug == slug && p.publish_day() == day
        })
    }
}

fn newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.publish_date.cmp(&a.publish_date));
}

/// In-memory implementation of the user, post, comment and tag repositories.
#[derive(Default)]
pub struct InMemoryBlogStore {
    state: RwLock<State>,
}

impl InMemoryBlogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryBlogStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut state = self.state.write().await;
        if state
            .users
            .values()
            .any(|u| u.id != user.id && u.username == user.username)
        {
            return Err(RepoError::Constraint(format!(
                "username {} already exists",
                user.username
            )));
        }
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        state.users.remove(&id).ok_or(RepoError::NotFound)?;

        let authored: Vec<Uuid> = state
            .posts
            .values()
            .filter(|p| p.author_id == id)
            .map(|p| p.id)
            .collect();
        state.posts.retain(|_, p| p.author_id != id);
        state
            .comments
            .retain(|_, c| c.author_id != id && !authored.contains(&c.post_id));
        state.links.retain(|(p, _)| !authored.contains(p));
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryBlogStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        let state = self.state.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| state.users.get(id).cloned())
            .collect())
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryBlogStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.state.read().await.posts.get(&id).cloned())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let mut state = self.state.write().await;
        if state.slug_taken(post.publish_day(), &post.slug, Some(post.id)) {
            return Err(RepoError::Constraint(format!(
                "slug {} already used on {}",
                post.slug,
                post.publish_day()
            )));
        }
        state.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        state.posts.remove(&id).ok_or(RepoError::NotFound)?;
        state.comments.retain(|_, c| c.post_id != id);
        state.links.retain(|(p, _)| *p != id);
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryBlogStore {
    async fn find_published(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let state = self.state.read().await;
        Ok(state.posts.get(&id).filter(|p| p.is_published()).cloned())
    }

    async fn find_published_by_date(
        &self,
        day: NaiveDate,
        slug: &str,
    ) -> Result<Option<Post>, RepoError> {
        let state = self.state.read().await;
        Ok(state
            .published()
            .find(|p| p.slug == slug && p.publish_day() == day)
            .cloned())
    }

    async fn list_published(
        &self,
        tag_id: Option<Uuid>,
        page: PageRequest,
        per_page: u64,
    ) -> Result<Page<Post>, RepoError> {
        let state = self.state.read().await;
        let mut posts: Vec<Post> = state
            .published()
            .filter(|p| match tag_id {
                Some(tag_id) => state.links.contains(&(p.id, tag_id)),
                None => true,
            })
            .cloned()
            .collect();
        newest_first(&mut posts);

        Ok(Page::from_vec(posts, page, per_page)?)
    }

    async fn latest_published(&self, limit: u64) -> Result<Vec<Post>, RepoError> {
        let state = self.state.read().await;
        let mut posts: Vec<Post> = state.published().cloned().collect();
        newest_first(&mut posts);
        posts.truncate(limit as usize);
        Ok(posts)
    }

    async fn similar_published(&self, post_id: Uuid, limit: u64) -> Result<Vec<Post>, RepoError> {
        let state = self.state.read().await;
        let tag_ids = state.tag_ids_of(post_id);

        let mut shared: HashMap<Uuid, usize> = HashMap::new();
        for (other, tag) in &state.links {
            if *other != post_id && tag_ids.contains(tag) {
                *shared.entry(*other).or_default() += 1;
            }
        }

        let candidates: Vec<Post> = state
            .published()
            .filter(|p| shared.contains_key(&p.id))
            .cloned()
            .collect();

        Ok(rank_by_shared_tags(&shared, candidates, limit as usize))
    }

    async fn search_published(
        &self,
        query: &str,
        threshold: f32,
    ) -> Result<Vec<SearchHit>, RepoError> {
        let state = self.state.read().await;
        let posts: Vec<Post> = state.published().cloned().collect();
        Ok(score_posts(posts, query, threshold))
    }

    async fn slug_taken(
        &self,
        day: NaiveDate,
        slug: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, RepoError> {
        Ok(self.state.read().await.slug_taken(day, slug, exclude))
    }

    async fn admin_list(
        &self,
        filter: &PostFilter,
        page: PageRequest,
        per_page: u64,
    ) -> Result<Page<Post>, RepoError> {
        let now = Utc::now();
        let state = self.state.read().await;
        let mut posts: Vec<Post> = state
            .posts
            .values()
            .filter(|p| filter.matches(p, now))
            .cloned()
            .collect();
        posts.sort_by(|a, b| {
            a.status
                .code()
                .cmp(b.status.code())
                .then(a.publish_date.cmp(&b.publish_date))
        });

        Ok(Page::from_vec(posts, page, per_page)?)
    }
}

#[async_trait]
impl BaseRepository<Comment, Uuid> for InMemoryBlogStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        Ok(self.state.read().await.comments.get(&id).cloned())
    }

    async fn save(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut state = self.state.write().await;
        if !state.posts.contains_key(&comment.post_id) {
            return Err(RepoError::Constraint(format!(
                "post {} does not exist",
                comment.post_id
            )));
        }
        state.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        state.comments.remove(&id).ok_or(RepoError::NotFound)?;
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for InMemoryBlogStore {
    async fn active_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let state = self.state.read().await;
        let mut comments: Vec<Comment> = state
            .comments
            .values()
            .filter(|c| c.post_id == post_id && c.active)
            .cloned()
            .collect();
        comments.sort_by_key(|c| c.created_at);
        Ok(comments)
    }

    async fn admin_list(
        &self,
        filter: &CommentFilter,
        page: PageRequest,
        per_page: u64,
    ) -> Result<Page<Comment>, RepoError> {
        let now = Utc::now();
        let state = self.state.read().await;
        let mut comments: Vec<Comment> = state
            .comments
            .values()
            .filter(|c| {
                let author = state
                    .users
                    .get(&c.author_id)
                    .map(|u| u.username.as_str())
                    .unwrap_or_default();
                filter.matches(c, author, now)
            })
            .cloned()
            .collect();
        comments.sort_by_key(|c| c.created_at);

        Ok(Page::from_vec(comments, page, per_page)?)
    }
}

#[async_trait]
impl TagRepository for InMemoryBlogStore {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError> {
        let state = self.state.read().await;
        Ok(state.tags.values().find(|t| t.slug == slug).cloned())
    }

    async fn tags_for_post(&self, post_id: Uuid) -> Result<Vec<Tag>, RepoError> {
        let state = self.state.read().await;
        let mut tags: Vec<Tag> = state
            .tag_ids_of(post_id)
            .iter()
            .filter_map(|id| state.tags.get(id).cloned())
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn tags_for_posts(&self, post_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<Tag>>, RepoError> {
        let mut by_post = HashMap::new();
        for post_id in post_ids {
            let tags = self.tags_for_post(*post_id).await?;
            if !tags.is_empty() {
                by_post.insert(*post_id, tags);
            }
        }
        Ok(by_post)
    }

    async fn set_post_tags(&self, post_id: Uuid, names: &[String]) -> Result<Vec<Tag>, RepoError> {
        let mut state = self.state.write().await;
        if !state.posts.contains_key(&post_id) {
            return Err(RepoError::Constraint(format!("post {post_id} does not exist")));
        }

        let mut tags = Vec::new();
        for name in normalize_tag_names(names) {
            let candidate = Tag::new(&name);
            let existing = state
                .tags
                .values()
                .find(|t| t.name == candidate.name || t.slug == candidate.slug)
                .cloned();
            let tag = match existing {
                Some(tag) => tag,
                None => {
                    state.tags.insert(candidate.id, candidate.clone());
                    candidate
                }
            };
            tags.push(tag);
        }

        state.links.retain(|(p, _)| *p != post_id);
        for tag in &tags {
            if !state.links.contains(&(post_id, tag.id)) {
                state.links.push((post_id, tag.id));
            }
        }

        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }
}
