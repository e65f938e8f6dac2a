//! PostgreSQL repository implementations for users, comments and tags.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, OnConflict};
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set, TransactionTrait,
};
use uuid::Uuid;

use blog_core::admin::CommentFilter;
use blog_core::domain::{Comment, Tag, User, normalize_tag_names};
use blog_core::error::RepoError;
use blog_core::pagination::{Page, PageRequest};
use blog_core::ports::{CommentRepository, TagRepository, UserRepository};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post_tag::{self, Entity as PostTagEntity};
use super::entity::tag::{self, Entity as TagEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// PostgreSQL tag repository.
pub type PostgresTagRepository = PostgresBaseRepository<TagEntity>;

/// `%term%` with LIKE wildcards in the term escaped.
pub(crate) fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped.to_lowercase())
}

/// Case-insensitive substring match on a column.
pub(crate) fn icontains<C: ColumnTrait>(column: C, term: &str) -> sea_orm::sea_query::SimpleExpr {
    Expr::expr(Func::lower(Expr::col((column.entity_name(), column)))).like(like_pattern(term))
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username = %username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = UserEntity::find()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn active_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .filter(comment::Column::Active.eq(true))
            .order_by_asc(comment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn admin_list(
        &self,
        filter: &CommentFilter,
        page: PageRequest,
        per_page: u64,
    ) -> Result<Page<Comment>, RepoError> {
        let now = chrono::Utc::now();
        let mut query = CommentEntity::find();

        if let Some(active) = filter.active {
            query = query.filter(comment::Column::Active.eq(active));
        }
        if let Some(created) = filter.created {
            let (start, end) = created.bounds(now);
            query = query
                .filter(comment::Column::CreatedAt.gte(start))
                .filter(comment::Column::CreatedAt.lt(end));
        }
        if let Some(updated) = filter.updated {
            let (start, end) = updated.bounds(now);
            query = query
                .filter(comment::Column::UpdatedAt.gte(start))
                .filter(comment::Column::UpdatedAt.lt(end));
        }
        if let Some(term) = filter.search_term() {
            query = query
                .join(JoinType::InnerJoin, comment::Relation::Author.def())
                .filter(
                    Condition::any()
                        .add(icontains(user::Column::Username, &term))
                        .add(icontains(comment::Column::Body, &term)),
                );
        }

        let paginator = query
            .order_by_asc(comment::Column::CreatedAt)
            .paginate(&self.db, per_page);
        let total = paginator.num_items().await.map_err(map_db_err)?;
        let number = page.resolve(total, per_page)?;
        let items = paginator
            .fetch_page(number - 1)
            .await
            .map_err(map_db_err)?;

        Ok(Page::new(
            items.into_iter().map(Into::into).collect(),
            number,
            total,
            per_page,
        ))
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError> {
        let result = TagEntity::find()
            .filter(tag::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn tags_for_post(&self, post_id: Uuid) -> Result<Vec<Tag>, RepoError> {
        let result = TagEntity::find()
            .join(JoinType::InnerJoin, tag::Relation::PostTags.def())
            .filter(post_tag::Column::PostId.eq(post_id))
            .order_by_asc(tag::Column::Name)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn tags_for_posts(&self, post_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<Tag>>, RepoError> {
        if post_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let links = PostTagEntity::find()
            .filter(post_tag::Column::PostId.is_in(post_ids.iter().copied()))
            .find_also_related(TagEntity)
            .order_by_asc(tag::Column::Name)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        let mut by_post: HashMap<Uuid, Vec<Tag>> = HashMap::new();
        for (link, tag) in links {
            if let Some(tag) = tag {
                by_post.entry(link.post_id).or_default().push(tag.into());
            }
        }
        Ok(by_post)
    }

    async fn set_post_tags(&self, post_id: Uuid, names: &[String]) -> Result<Vec<Tag>, RepoError> {
        let names = normalize_tag_names(names);
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let mut tags = Vec::with_capacity(names.len());
        for name in &names {
            let candidate = Tag::new(name);
            let existing = TagEntity::find()
                .filter(
                    Condition::any()
                        .add(tag::Column::Name.eq(candidate.name.as_str()))
                        .add(tag::Column::Slug.eq(candidate.slug.as_str())),
                )
                .one(&txn)
                .await
                .map_err(map_db_err)?;

            let tag: Tag = match existing {
                Some(model) => model.into(),
                None => {
                    let active: tag::ActiveModel = candidate.into();
                    TagEntity::insert(active)
                        .exec_with_returning(&txn)
                        .await
                        .map_err(map_db_err)?
                        .into()
                }
            };
            tags.push(tag);
        }

        PostTagEntity::delete_many()
            .filter(post_tag::Column::PostId.eq(post_id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        if !tags.is_empty() {
            let links = tags.iter().map(|t| post_tag::ActiveModel {
                post_id: Set(post_id),
                tag_id: Set(t.id),
            });
            PostTagEntity::insert_many(links)
                .on_conflict(
                    OnConflict::columns([post_tag::Column::PostId, post_tag::Column::TagId])
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(&txn)
                .await
                .map_err(map_db_err)?;
        }

        txn.commit().await.map_err(map_db_err)?;
        tracing::debug!(post_id = %post_id, tags = tags.len(), "Post tags replaced");

        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%_Off"), "%50\\%\\_off%");
    }
}
