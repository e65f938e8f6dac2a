use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeZone, Utc};
use sea_orm::{DatabaseBackend, MockDatabase, Value};
use uuid::Uuid;

use blog_core::domain::{Post, PostStatus};
use blog_core::error::RepoError;
use blog_core::pagination::PageRequest;
use blog_core::ports::{BaseRepository, CommentRepository, PostRepository};

use super::entity::{comment, post, post_tag};
use super::{PostgresCommentRepository, PostgresPostRepository};

fn post_model(title: &str, status: &str, day: u32) -> post::Model {
    let at = Utc.with_ymd_and_hms(2024, 3, day, 10, 0, 0).unwrap();
    post::Model {
        id: Uuid::new_v4(),
        author_id: Uuid::new_v4(),
        title: title.to_owned(),
        slug: title.to_lowercase().replace(' ', "-"),
        body: "Body".to_owned(),
        status: status.to_owned(),
        publish_date: at.into(),
        created_at: at.into(),
        updated_at: at.into(),
    }
}

fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::from(n))])
}

#[tokio::test]
async fn test_find_post_by_id() {
    let model = post_model("Test Post", "PB", 1);
    let post_id = model.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, post_id);
    assert_eq!(post.status, PostStatus::Published);
}

#[tokio::test]
async fn test_find_published_by_date_filters_status_and_day() {
    let model = post_model("Hello World", "PB", 7);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model]])
        .into_connection();
    let repo = PostgresPostRepository::new(db);

    let day = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
    let found = repo.find_published_by_date(day, "hello-world").await.unwrap();
    assert_eq!(found.unwrap().absolute_url(), "/2024/3/7/hello-world");

    let log = repo.db.into_transaction_log();
    let sql = format!("{:?}", log[0]);
    assert!(sql.contains(r#""posts"."status" = $1"#), "{sql}");
    assert!(sql.contains(r#""posts"."publish_date" >= $3"#), "{sql}");
}

#[tokio::test]
async fn test_list_published_pages() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[count_row(4)]])
        .append_query_results([vec![post_model("Newest", "PB", 9)]])
        .into_connection();
    let repo = PostgresPostRepository::new(db);

    let page = repo
        .list_published(None, PageRequest::Number(2), 3)
        .await
        .unwrap();

    assert_eq!(page.number, 2);
    assert_eq!(page.num_pages, 2);
    assert_eq!(page.items.len(), 1);
    assert!(page.has_previous());
}

#[tokio::test]
async fn test_list_published_rejects_page_past_end() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[count_row(3)]])
        .into_connection();
    let repo = PostgresPostRepository::new(db);

    let err = repo
        .list_published(None, PageRequest::Number(2), 3)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidPage(_)));
}

#[tokio::test]
async fn test_similar_published_orders_by_shared_tags() {
    let source = Uuid::new_v4();
    let (rust, web) = (Uuid::new_v4(), Uuid::new_v4());
    let one_shared = post_model("One", "PB", 5);
    let two_shared = post_model("Two", "PB", 2);

    let link = |post_id, tag_id| post_tag::Model { post_id, tag_id };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![link(source, rust), link(source, web)]])
        .append_query_results([vec![
            link(one_shared.id, rust),
            link(two_shared.id, rust),
            link(two_shared.id, web),
        ]])
        .append_query_results([vec![one_shared.clone(), two_shared.clone()]])
        .into_connection();
    let repo = PostgresPostRepository::new(db);

    let similar = repo.similar_published(source, 4).await.unwrap();
    let titles: Vec<_> = similar.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Two", "One"]);
}

#[tokio::test]
async fn test_search_uses_trigram_similarity() {
    let model = post_model("Django tips", "PB", 3);
    let row = BTreeMap::from([
        ("id", Value::from(model.id)),
        ("author_id", Value::from(model.author_id)),
        ("title", Value::from(model.title.clone())),
        ("slug", Value::from(model.slug.clone())),
        ("body", Value::from(model.body.clone())),
        ("status", Value::from(model.status.clone())),
        ("publish_date", Value::from(model.publish_date)),
        ("created_at", Value::from(model.created_at)),
        ("updated_at", Value::from(model.updated_at)),
        ("similarity", Value::from(0.6f32)),
        ("rank", Value::from(0.2f32)),
    ]);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[row]])
        .into_connection();
    let repo = PostgresPostRepository::new(db);

    let hits = repo.search_published("django", 0.1).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].post.title, "Django tips");
    assert!((hits[0].similarity - 0.6).abs() < f32::EPSILON);

    let sql = format!("{:?}", repo.db.into_transaction_log()[0]);
    assert!(sql.contains("similarity(title"), "{sql}");
    assert!(sql.contains("ts_rank"), "{sql}");
}

#[tokio::test]
async fn test_slug_taken_counts_same_day() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[count_row(1)]])
        .into_connection();
    let repo = PostgresPostRepository::new(db);

    let day = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
    assert!(repo.slug_taken(day, "hello", None).await.unwrap());
}

#[tokio::test]
async fn test_active_comments_for_post() {
    let post_id = Uuid::new_v4();
    let now = Utc::now();
    let model = comment::Model {
        id: Uuid::new_v4(),
        post_id,
        author_id: Uuid::new_v4(),
        body: "Nice".to_owned(),
        active: true,
        created_at: now.into(),
        updated_at: now.into(),
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model]])
        .into_connection();
    let repo = PostgresCommentRepository::new(db);

    let comments = repo.active_for_post(post_id).await.unwrap();
    assert_eq!(comments.len(), 1);
    assert!(comments[0].active);

    let sql = format!("{:?}", repo.db.into_transaction_log()[0]);
    assert!(sql.contains(r#"ORDER BY "comments"."created_at" ASC"#), "{sql}");
}
