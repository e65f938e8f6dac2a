//! PostgreSQL post repository: published listings, similar posts and search.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, FromQueryResult, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Select, Value,
};
use uuid::Uuid;

use blog_core::admin::PostFilter;
use blog_core::domain::{Post, PostStatus, day_bounds, rank_by_shared_tags};
use blog_core::error::RepoError;
use blog_core::pagination::{Page, PageRequest};
use blog_core::ports::PostRepository;
use blog_core::search::SearchHit;

use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_tag::{self, Entity as PostTagEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};
use super::postgres_repo::icontains;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

const SIMILARITY_SQL: &str = "similarity(title, $1)";
const SIMILARITY_FILTER_SQL: &str = "similarity(title, $1) > $2";
const RANK_SQL: &str = "ts_rank(\
    setweight(to_tsvector(coalesce(title, '')), 'A') || \
    setweight(to_tsvector(coalesce(body, '')), 'B'), \
    plainto_tsquery($1))";

/// Posts the public site may show.
fn published() -> Select<PostEntity> {
    PostEntity::find().filter(post::Column::Status.eq(PostStatus::Published.code()))
}

async fn fetch_page(
    db: &sea_orm::DbConn,
    query: Select<PostEntity>,
    page: PageRequest,
    per_page: u64,
) -> Result<Page<Post>, RepoError> {
    let paginator = query.paginate(db, per_page);
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

/// A post row annotated with its search scores.
#[derive(Debug, FromQueryResult)]
struct SearchRow {
    id: Uuid,
    author_id: Uuid,
    title: String,
    slug: String,
    body: String,
    status: String,
    publish_date: DateTimeWithTimeZone,
    created_at: DateTimeWithTimeZone,
    updated_at: DateTimeWithTimeZone,
    similarity: f32,
    rank: f32,
}

impl From<SearchRow> for SearchHit {
    fn from(row: SearchRow) -> Self {
        let model = post::Model {
            id: row.id,
            author_id: row.author_id,
            title: row.title,
            slug: row.slug,
            body: row.body,
            status: row.status,
            publish_date: row.publish_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        };
        SearchHit {
            post: model.into(),
            similarity: row.similarity,
            rank: row.rank,
        }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_published(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let result = published()
            .filter(post::Column::Id.eq(id))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_published_by_date(
        &self,
        day: NaiveDate,
        slug: &str,
    ) -> Result<Option<Post>, RepoError> {
        let (start, end) = day_bounds(day);
        let result = published()
            .filter(post::Column::Slug.eq(slug))
            .filter(post::Column::PublishDate.gte(start))
            .filter(post::Column::PublishDate.lt(end))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn list_published(
        &self,
        tag_id: Option<Uuid>,
        page: PageRequest,
        per_page: u64,
    ) -> Result<Page<Post>, RepoError> {
        let mut query = published();
        if let Some(tag_id) = tag_id {
            query = query
                .join(JoinType::InnerJoin, post::Relation::PostTags.def())
                .filter(post_tag::Column::TagId.eq(tag_id));
        }

        let query = query.order_by_desc(post::Column::PublishDate);
        fetch_page(&self.db, query, page, per_page).await
    }

    async fn latest_published(&self, limit: u64) -> Result<Vec<Post>, RepoError> {
        let result = published()
            .order_by_desc(post::Column::PublishDate)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn similar_published(&self, post_id: Uuid, limit: u64) -> Result<Vec<Post>, RepoError> {
        let tag_ids: Vec<Uuid> = PostTagEntity::find()
            .filter(post_tag::Column::PostId.eq(post_id))
            .all(&self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(|link| link.tag_id)
            .collect();

        if tag_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut shared: HashMap<Uuid, usize> = HashMap::new();
        for link in PostTagEntity::find()
            .filter(post_tag::Column::TagId.is_in(tag_ids))
            .filter(post_tag::Column::PostId.ne(post_id))
            .all(&self.db)
            .await
            .map_err(map_db_err)?
        {
            *shared.entry(link.post_id).or_default() += 1;
        }

        if shared.is_empty() {
            return Ok(Vec::new());
        }

        let candidates: Vec<Post> = published()
            .filter(post::Column::Id.is_in(shared.keys().copied()))
            .all(&self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(rank_by_shared_tags(&shared, candidates, limit as usize))
    }

    async fn search_published(
        &self,
        query: &str,
        threshold: f32,
    ) -> Result<Vec<SearchHit>, RepoError> {
        tracing::debug!(query = %query, threshold, "Searching posts");

        let rows = published()
            .column_as(Expr::cust_with_values(SIMILARITY_SQL, [query]), "similarity")
            .column_as(Expr::cust_with_values(RANK_SQL, [query]), "rank")
            .filter(Expr::cust_with_values(
                SIMILARITY_FILTER_SQL,
                [Value::from(query), Value::from(threshold)],
            ))
            .order_by_desc(Expr::cust_with_values(SIMILARITY_SQL, [query]))
            .into_model::<SearchRow>()
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn slug_taken(
        &self,
        day: NaiveDate,
        slug: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, RepoError> {
        let (start, end) = day_bounds(day);
        let mut query = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .filter(post::Column::PublishDate.gte(start))
            .filter(post::Column::PublishDate.lt(end));
        if let Some(id) = exclude {
            query = query.filter(post::Column::Id.ne(id));
        }

        let count = query.count(&self.db).await.map_err(map_db_err)?;
        Ok(count > 0)
    }

    async fn admin_list(
        &self,
        filter: &PostFilter,
        page: PageRequest,
        per_page: u64,
    ) -> Result<Page<Post>, RepoError> {
        let now = chrono::Utc::now();
        let mut query = PostEntity::find();

        if let Some(status) = filter.status {
            query = query.filter(post::Column::Status.eq(status.code()));
        }
        if let Some(author_id) = filter.author_id {
            query = query.filter(post::Column::AuthorId.eq(author_id));
        }
        if let Some(created) = filter.created {
            let (start, end) = created.bounds(now);
            query = query
                .filter(post::Column::CreatedAt.gte(start))
                .filter(post::Column::CreatedAt.lt(end));
        }
        if !filter.publish.is_empty() {
            let Some((start, end)) = filter.publish.bounds() else {
                return Ok(Page::new(Vec::new(), 1, 0, per_page));
            };
            query = query
                .filter(post::Column::PublishDate.gte(start))
                .filter(post::Column::PublishDate.lt(end));
        }
        if let Some(term) = filter.search_term() {
            query = query.filter(
                Condition::any()
                    .add(icontains(post::Column::Title, &term))
                    .add(icontains(post::Column::Body, &term)),
            );
        }

        let query = query
            .order_by_asc(post::Column::Status)
            .order_by_asc(post::Column::PublishDate);
        fetch_page(&self.db, query, page, per_page).await
    }
}
