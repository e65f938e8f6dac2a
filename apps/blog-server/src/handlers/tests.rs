//! Route tests against the in-memory store.

use std::sync::Arc;

use actix_web::{App, http::StatusCode, test, web};
use chrono::{Duration, TimeZone, Utc};
use serde_json::{Value, json};

use blog_core::domain::{Comment, Post, PostStatus, User};
use blog_core::ports::{Mailer, PasswordService, TokenService};
use blog_infra::{Argon2PasswordService, JwtConfig, JwtTokenService, MemoryMailer};

use super::configure_routes;
use crate::config::BlogSettings;
use crate::state::AppState;

const ADMIN_PASSWORD: &str = "correct-horse";

struct Fixture {
    state: AppState,
    mailer: Arc<MemoryMailer>,
    tokens: Arc<dyn TokenService>,
    passwords: Arc<dyn PasswordService>,
    admin: User,
    reader: User,
}

impl Fixture {
    async fn new() -> Self {
        Self::with_settings(BlogSettings::default()).await
    }

    async fn with_settings(settings: BlogSettings) -> Self {
        let mailer = Arc::new(MemoryMailer::new());
        let state = AppState::in_memory(settings, mailer.clone() as Arc<dyn Mailer>).unwrap();
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(JwtConfig {
            secret: "test-secret".into(),
            ..Default::default()
        }));

        let hash = passwords.hash(ADMIN_PASSWORD).unwrap();
        let admin = state
            .users
            .save(User::new("admin".into(), "admin@example.com".into(), hash.clone()).staff())
            .await
            .unwrap();
        let reader = state
            .users
            .save(User::new("reader".into(), "reader@example.com".into(), hash))
            .await
            .unwrap();

        Self {
            state,
            mailer,
            tokens,
            passwords,
            admin,
            reader,
        }
    }

    /// Published post on 2024-03-07, `offset` hours after 08:00.
    async fn publish(&self, title: &str, slug: &str, body: &str, offset: i64, tags: &[&str]) -> Post {
        let mut post = Post::new(self.admin.id, title.into(), slug.into(), body.into());
        post.status = PostStatus::Published;
        post.publish_date = Utc.with_ymd_and_hms(2024, 3, 7, 8, 0, 0).unwrap() + Duration::hours(offset);
        let post = self.state.posts.save(post).await.unwrap();

        let names: Vec<String> = tags.iter().map(|t| t.to_string()).collect();
        self.state.tags.set_post_tags(post.id, &names).await.unwrap();
        post
    }

    async fn draft(&self, title: &str, slug: &str) -> Post {
        let post = Post::new(self.admin.id, title.into(), slug.into(), "draft body".into());
        self.state.posts.save(post).await.unwrap()
    }

    fn bearer(&self, user: &User) -> (&'static str, String) {
        let token = self
            .tokens
            .generate_token(user.id, &user.username, user.roles())
            .unwrap();
        ("Authorization", format!("Bearer {}", token))
    }
}

macro_rules! init_app {
    ($fx:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($fx.state.clone()))
                .app_data(web::Data::new($fx.tokens.clone()))
                .app_data(web::Data::new($fx.passwords.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

fn body_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[actix_web::test]
async fn test_health_check() {
    let fx = Fixture::new().await;
    let app = init_app!(fx);

    let res: Value = test::call_and_read_body_json(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(res["status"], "ok");
}

#[actix_web::test]
async fn test_list_shows_only_published_posts() {
    let fx = Fixture::new().await;
    fx.publish("Visible post", "visible", "Some *markdown* body", 0, &["rust"]).await;
    fx.draft("Hidden draft", "hidden").await;
    let app = init_app!(fx);

    let req = test::TestRequest::get().uri("/").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let html = body_text(&test::read_body(res).await);
    assert!(html.contains("Visible post"));
    assert!(html.contains("<em>markdown</em>"));
    assert!(html.contains("/tag/rust"));
    assert!(!html.contains("Hidden draft"));
}

#[actix_web::test]
async fn test_list_pagination() {
    let fx = Fixture::new().await;
    for i in 0..4 {
        fx.publish(&format!("Post number {i}"), &format!("post-{i}"), "body", i, &[]).await;
    }
    let app = init_app!(fx);

    let first = test::call_and_read_body(&app, test::TestRequest::get().uri("/").to_request()).await;
    let first = body_text(&first);
    assert!(first.contains("Post number 3"));
    assert!(!first.contains("Post number 0"));
    assert!(first.contains("Page 1 of 2."));

    let last = test::call_and_read_body(&app, test::TestRequest::get().uri("/?page=last").to_request()).await;
    assert!(body_text(&last).contains("Post number 0"));

    for uri in ["/?page=3", "/?page=0", "/?page=abc"] {
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

#[actix_web::test]
async fn test_tag_list_filters_and_unknown_tag_is_404() {
    let fx = Fixture::new().await;
    fx.publish("Tagged", "tagged", "body", 0, &["rust"]).await;
    fx.publish("Untagged", "untagged", "body", 1, &["go"]).await;
    let app = init_app!(fx);

    let html = test::call_and_read_body(&app, test::TestRequest::get().uri("/tag/rust").to_request()).await;
    let html = body_text(&html);
    assert!(html.contains("Posts tagged with"));
    assert!(html.contains("Tagged"));
    assert!(!html.contains("Untagged"));

    let res = test::call_service(&app, test::TestRequest::get().uri("/tag/nope").to_request()).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_detail_shows_active_comments_and_similar_posts() {
    let fx = Fixture::new().await;
    let post = fx.publish("Main post", "main", "Main body", 0, &["rust", "web"]).await;
    fx.publish("Related post", "related", "body", 1, &["rust"]).await;
    fx.state
        .comments
        .save(Comment::new(post.id, fx.reader.id, "Nice read".into()))
        .await
        .unwrap();
    let mut hidden = Comment::new(post.id, fx.reader.id, "Spam".into());
    hidden.set_active(false);
    fx.state.comments.save(hidden).await.unwrap();
    let app = init_app!(fx);

    let html = test::call_and_read_body(&app, test::TestRequest::get().uri("/2024/3/7/main").to_request()).await;
    let html = body_text(&html);
    assert!(html.contains("Main post"));
    assert!(html.contains("Nice read"));
    assert!(html.contains("by reader"));
    assert!(!html.contains("Spam"));
    assert!(html.contains("1 comment"));
    assert!(html.contains("Related post"));
}

#[actix_web::test]
async fn test_detail_404s() {
    let fx = Fixture::new().await;
    fx.publish("Main post", "main", "body", 0, &[]).await;
    let draft = fx.draft("Draft", "draft").await;
    let app = init_app!(fx);

    let draft_url = draft.absolute_url();
    for uri in ["/2024/3/8/main", "/2024/2/30/main", "/2024/3/7/other", draft_url.as_str()] {
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

#[actix_web::test]
async fn test_share_sends_email() {
    let fx = Fixture::new().await;
    let post = fx.publish("Shared post", "shared", "body", 0, &[]).await;
    let app = init_app!(fx);

    let form = test::call_and_read_body(
        &app,
        test::TestRequest::get().uri(&format!("/{}/share", post.id)).to_request(),
    )
    .await;
    assert!(body_text(&form).contains("Share \"Shared post\" by e-mail"));

    let req = test::TestRequest::post()
        .uri(&format!("/{}/share", post.id))
        .set_form([
            ("name", "Ana"),
            ("sender_email", "ana@example.com"),
            ("recipient_email", "bo@example.com"),
            ("comments", "Worth it"),
        ])
        .to_request();
    let html = body_text(&test::call_and_read_body(&app, req).await);
    assert!(html.contains("successfully sent"));

    let outbox = fx.mailer.outbox().await;
    assert_eq!(outbox.len(), 1);
    assert_eq!(outbox[0].subject, "Ana recommends you to read Shared post");
    assert!(outbox[0].body.contains("http://localhost:8080/2024/3/7/shared"));
    assert!(outbox[0].body.contains("Ana's comments: Worth it"));
    assert_eq!(outbox[0].to, vec!["bo@example.com".to_string()]);
}

#[actix_web::test]
async fn test_share_invalid_form_redisplays_errors() {
    let fx = Fixture::new().await;
    let post = fx.publish("Shared post", "shared", "body", 0, &[]).await;
    let app = init_app!(fx);

    let req = test::TestRequest::post()
        .uri(&format!("/{}/share", post.id))
        .set_form([("name", "Ana"), ("sender_email", "nope"), ("recipient_email", "")])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let html = body_text(&test::read_body(res).await);
    assert!(html.contains("sender_email: Enter a valid sender email address."));
    assert!(fx.mailer.outbox().await.is_empty());
}

#[actix_web::test]
async fn test_share_without_form_body_redisplays_required_errors() {
    let fx = Fixture::new().await;
    let post = fx.publish("Shared post", "shared", "body", 0, &[]).await;
    let app = init_app!(fx);

    let req = test::TestRequest::post()
        .uri(&format!("/{}/share", post.id))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let html = body_text(&test::read_body(res).await);
    assert!(html.contains("name: Name must be between 2 and 25 characters."));
    assert!(fx.mailer.outbox().await.is_empty());
}

#[actix_web::test]
async fn test_share_unpublished_post_is_404() {
    let fx = Fixture::new().await;
    let draft = fx.draft("Draft", "draft").await;
    let app = init_app!(fx);

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri(&format!("/{}/share", draft.id)).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_comment_requires_post_method() {
    let fx = Fixture::new().await;
    let post = fx.publish("Post", "post", "body", 0, &[]).await;
    let app = init_app!(fx);

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri(&format!("/{}/comment", post.id)).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[actix_web::test]
async fn test_anonymous_comment_is_credited_to_fallback_author() {
    let fx = Fixture::new().await;
    let post = fx.publish("Post", "post", "body", 0, &[]).await;
    let app = init_app!(fx);

    let req = test::TestRequest::post()
        .uri(&format!("/{}/comment", post.id))
        .set_form([("body", "First!")])
        .to_request();
    let html = body_text(&test::call_and_read_body(&app, req).await);
    assert!(html.contains("Your comment has been added."));

    let comments = fx.state.comments.active_for_post(post.id).await.unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].author_id, fx.admin.id);
}

#[actix_web::test]
async fn test_signed_in_comment_uses_token_user() {
    let fx = Fixture::new().await;
    let post = fx.publish("Post", "post", "body", 0, &[]).await;
    let app = init_app!(fx);

    let req = test::TestRequest::post()
        .uri(&format!("/{}/comment", post.id))
        .insert_header(fx.bearer(&fx.reader))
        .set_form([("body", "From a reader")])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let comments = fx.state.comments.active_for_post(post.id).await.unwrap();
    assert_eq!(comments[0].author_id, fx.reader.id);
}

#[actix_web::test]
async fn test_blank_comment_is_rejected() {
    let fx = Fixture::new().await;
    let post = fx.publish("Post", "post", "body", 0, &[]).await;
    let app = init_app!(fx);

    let req = test::TestRequest::post()
        .uri(&format!("/{}/comment", post.id))
        .set_form([("body", "   ")])
        .to_request();
    let html = body_text(&test::call_and_read_body(&app, req).await);
    assert!(html.contains("class=\"error\""));
    assert!(fx.state.comments.active_for_post(post.id).await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_comment_with_non_form_body_redisplays_form() {
    let fx = Fixture::new().await;
    let post = fx.publish("Post", "post", "body", 0, &[]).await;
    let app = init_app!(fx);

    let req = test::TestRequest::post()
        .uri(&format!("/{}/comment", post.id))
        .set_json(json!({ "body": "not a form" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let html = body_text(&test::read_body(res).await);
    assert!(html.contains("class=\"error\""));
    assert!(fx.state.comments.active_for_post(post.id).await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_missing_fallback_author_is_server_error() {
    let fx = Fixture::with_settings(BlogSettings {
        comment_author: "ghost".into(),
        ..Default::default()
    })
    .await;
    let post = fx.publish("Post", "post", "body", 0, &[]).await;
    let app = init_app!(fx);

    let req = test::TestRequest::post()
        .uri(&format!("/{}/comment", post.id))
        .set_form([("body", "Hello")])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn test_search() {
    let fx = Fixture::new().await;
    fx.publish("Learning Rust ownership", "rust", "Borrowing explained", 0, &[]).await;
    fx.publish("Gardening tips", "garden", "Tomatoes", 1, &[]).await;
    let app = init_app!(fx);

    let empty = test::call_and_read_body(&app, test::TestRequest::get().uri("/search/").to_request()).await;
    assert!(body_text(&empty).contains("Search for posts"));

    let html = test::call_and_read_body(&app, test::TestRequest::get().uri("/search/?query=rust").to_request()).await;
    let html = body_text(&html);
    assert!(html.contains("Posts containing \"rust\""));
    assert!(html.contains("Learning Rust ownership"));
    assert!(!html.contains("Gardening tips"));
}

#[actix_web::test]
async fn test_feed_lists_latest_posts_and_is_invalidated_by_admin_writes() {
    let fx = Fixture::new().await;
    for i in 0..6 {
        fx.publish(&format!("Feed item {i}"), &format!("item-{i}"), "body", i, &[]).await;
    }
    let app = init_app!(fx);

    let res = test::call_service(&app, test::TestRequest::get().uri("/feed/").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(
        res.headers()
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("application/rss+xml")
    );
    let xml = body_text(&test::read_body(res).await);
    assert!(xml.contains("<title>My blog</title>"));
    assert!(xml.contains("Feed item 5"));
    assert!(!xml.contains("Feed item 0"));

    let req = test::TestRequest::post()
        .uri("/admin/api/posts")
        .insert_header(fx.bearer(&fx.admin))
        .set_json(json!({
            "title": "Fresh post",
            "body": "new",
            "status": "published",
            "publish_date": "2030-01-01T00:00:00Z"
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let xml = test::call_and_read_body(&app, test::TestRequest::get().uri("/feed/").to_request()).await;
    assert!(body_text(&xml).contains("Fresh post"));
}

#[actix_web::test]
async fn test_feed_invalidation_reaches_every_host() {
    let fx = Fixture::new().await;
    fx.publish("Old news", "old-news", "body", 0, &[]).await;
    let app = init_app!(fx);

    let public_feed = || {
        test::TestRequest::get()
            .uri("/feed/")
            .insert_header(("Host", "blog.example.com"))
            .to_request()
    };

    let xml = body_text(&test::call_and_read_body(&app, public_feed()).await);
    assert!(xml.contains("http://blog.example.com/2024/3/7/old-news"));

    let req = test::TestRequest::post()
        .uri("/admin/api/posts")
        .insert_header(("Host", "localhost:8080"))
        .insert_header(fx.bearer(&fx.admin))
        .set_json(json!({
            "title": "Fresh post",
            "body": "new",
            "status": "published",
            "publish_date": "2030-01-01T00:00:00Z"
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let xml = body_text(&test::call_and_read_body(&app, public_feed()).await);
    assert!(xml.contains("Fresh post"));
    assert!(xml.contains("http://blog.example.com/2030/1/1/fresh-post"));
    assert!(!xml.contains("localhost:8080"));
}

#[actix_web::test]
async fn test_admin_login() {
    let fx = Fixture::new().await;
    let app = init_app!(fx);

    let bad = test::TestRequest::post()
        .uri("/admin/api/login")
        .set_json(json!({ "username": "admin", "password": "wrong" }))
        .to_request();
    assert_eq!(test::call_service(&app, bad).await.status(), StatusCode::UNAUTHORIZED);

    let good = test::TestRequest::post()
        .uri("/admin/api/login")
        .set_json(json!({ "username": "admin", "password": ADMIN_PASSWORD }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, good).await;
    assert_eq!(body["token_type"], "Bearer");

    let token = body["access_token"].as_str().unwrap();
    let claims = fx.tokens.validate_token(token).unwrap();
    assert_eq!(claims.user_id, fx.admin.id);
    assert!(claims.roles.contains(&"staff".to_string()));
}

#[actix_web::test]
async fn test_admin_requires_staff() {
    let fx = Fixture::new().await;
    let app = init_app!(fx);

    let anonymous = test::TestRequest::get().uri("/admin/api/posts").to_request();
    assert_eq!(test::call_service(&app, anonymous).await.status(), StatusCode::UNAUTHORIZED);

    let reader = test::TestRequest::get()
        .uri("/admin/api/posts")
        .insert_header(fx.bearer(&fx.reader))
        .to_request();
    assert_eq!(test::call_service(&app, reader).await.status(), StatusCode::FORBIDDEN);

    let staff = test::TestRequest::get()
        .uri("/admin/api/posts")
        .insert_header(fx.bearer(&fx.admin))
        .to_request();
    assert_eq!(test::call_service(&app, staff).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_admin_post_lifecycle() {
    let fx = Fixture::new().await;
    let app = init_app!(fx);
    let auth = fx.bearer(&fx.admin);

    let create = test::TestRequest::post()
        .uri("/admin/api/posts")
        .insert_header(auth.clone())
        .set_json(json!({
            "title": "Hello World",
            "body": "First post",
            "status": "published",
            "publish_date": "2024-06-01T09:00:00Z",
            "tags": ["Rust", "rust", "web"]
        }))
        .to_request();
    let res = test::call_service(&app, create).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(res).await;
    let data = &created["data"];
    assert_eq!(data["slug"], "hello-world");
    assert_eq!(data["url"], "/2024/6/1/hello-world");
    assert_eq!(data["tags"].as_array().unwrap().len(), 2);
    let id = data["id"].as_str().unwrap().to_string();

    let duplicate = test::TestRequest::post()
        .uri("/admin/api/posts")
        .insert_header(auth.clone())
        .set_json(json!({
            "title": "Hello World",
            "body": "Same day, same slug",
            "publish_date": "2024-06-01T21:00:00Z"
        }))
        .to_request();
    assert_eq!(test::call_service(&app, duplicate).await.status(), StatusCode::CONFLICT);

    let next_day = test::TestRequest::post()
        .uri("/admin/api/posts")
        .insert_header(auth.clone())
        .set_json(json!({
            "title": "Hello World",
            "body": "Next day",
            "publish_date": "2024-06-02T09:00:00Z"
        }))
        .to_request();
    assert_eq!(test::call_service(&app, next_day).await.status(), StatusCode::CREATED);

    let invalid = test::TestRequest::post()
        .uri("/admin/api/posts")
        .insert_header(auth.clone())
        .set_json(json!({ "title": "", "body": "" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, invalid).await.status(),
        StatusCode::UNPROCESSABLE_ENTITY
    );

    let update = test::TestRequest::put()
        .uri(&format!("/admin/api/posts/{id}"))
        .insert_header(auth.clone())
        .set_json(json!({ "title": "Hello again", "slug": "hello-world", "body": "Edited" }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, update).await;
    assert_eq!(updated["data"]["title"], "Hello again");
    assert_eq!(updated["data"]["status"], "published");
    assert_eq!(updated["data"]["tags"].as_array().unwrap().len(), 0);

    let public = test::call_service(&app, test::TestRequest::get().uri("/2024/6/1/hello-world").to_request()).await;
    assert_eq!(public.status(), StatusCode::OK);

    let list = test::TestRequest::get()
        .uri("/admin/api/posts?status=published&year=2024&month=6&day=1")
        .insert_header(auth.clone())
        .to_request();
    let listed: Value = test::call_and_read_body_json(&app, list).await;
    assert_eq!(listed["data"]["total"], 1);

    let delete = test::TestRequest::delete()
        .uri(&format!("/admin/api/posts/{id}"))
        .insert_header(auth.clone())
        .to_request();
    assert_eq!(test::call_service(&app, delete).await.status(), StatusCode::OK);

    let gone = test::TestRequest::get()
        .uri(&format!("/admin/api/posts/{id}"))
        .insert_header(auth)
        .to_request();
    assert_eq!(test::call_service(&app, gone).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_admin_rejects_unknown_author() {
    let fx = Fixture::new().await;
    let app = init_app!(fx);

    let req = test::TestRequest::post()
        .uri("/admin/api/posts")
        .insert_header(fx.bearer(&fx.admin))
        .set_json(json!({
            "title": "Ghost written",
            "body": "body",
            "author_id": uuid::Uuid::new_v4().to_string()
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_admin_comment_moderation() {
    let fx = Fixture::new().await;
    let post = fx.publish("Post", "post", "body", 0, &[]).await;
    let comment = fx
        .state
        .comments
        .save(Comment::new(post.id, fx.reader.id, "Buy cheap watches".into()))
        .await
        .unwrap();
    let app = init_app!(fx);
    let auth = fx.bearer(&fx.admin);

    let list = test::TestRequest::get()
        .uri("/admin/api/comments?active=true&q=watches")
        .insert_header(auth.clone())
        .to_request();
    let listed: Value = test::call_and_read_body_json(&app, list).await;
    assert_eq!(listed["data"]["items"][0]["id"], comment.id.to_string());

    let deactivate = test::TestRequest::patch()
        .uri(&format!("/admin/api/comments/{}", comment.id))
        .insert_header(auth.clone())
        .set_json(json!({ "active": false }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, deactivate).await;
    assert_eq!(updated["data"]["active"], false);

    let html = test::call_and_read_body(&app, test::TestRequest::get().uri("/2024/3/7/post").to_request()).await;
    assert!(!body_text(&html).contains("Buy cheap watches"));

    let missing = test::TestRequest::patch()
        .uri(&format!("/admin/api/comments/{}", uuid::Uuid::new_v4()))
        .insert_header(auth)
        .set_json(json!({ "active": true }))
        .to_request();
    assert_eq!(test::call_service(&app, missing).await.status(), StatusCode::NOT_FOUND);
}
