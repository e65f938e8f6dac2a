//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use blog_core::search::DEFAULT_SIMILARITY_THRESHOLD;

pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseSettings>,
    pub blog: BlogSettings,
    pub mail: MailSettings,
    pub admin: Option<AdminBootstrap>,
}

/// Connection settings, present when `DATABASE_URL` is set.
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Tunables of the public site.
#[derive(Debug, Clone)]
pub struct BlogSettings {
    pub posts_per_page: u64,
    pub similar_posts_limit: u64,
    pub feed_items: u64,
    pub feed_cache_ttl: Duration,
    pub search_threshold: f32,
    /// Username credited with comments from anonymous visitors.
    pub comment_author: String,
}

impl Default for BlogSettings {
    fn default() -> Self {
        Self {
            posts_per_page: 3,
            similar_posts_limit: 4,
            feed_items: 5,
            feed_cache_ttl: Duration::from_secs(300),
            search_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            comment_author: "admin".to_string(),
        }
    }
}

impl BlogSettings {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            posts_per_page: env_or("POSTS_PER_PAGE", defaults.posts_per_page).max(1),
            similar_posts_limit: env_or("SIMILAR_POSTS_LIMIT", defaults.similar_posts_limit),
            feed_items: env_or("FEED_ITEMS", defaults.feed_items),
            feed_cache_ttl: Duration::from_secs(env_or(
                "FEED_CACHE_TTL_SECS",
                defaults.feed_cache_ttl.as_secs(),
            )),
            search_threshold: env_or("SEARCH_SIMILARITY_THRESHOLD", defaults.search_threshold),
            comment_author: env::var("COMMENT_AUTHOR").unwrap_or(defaults.comment_author),
        }
    }
}

/// Which transport delivers share-by-email messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailBackend {
    Console,
    Webhook(String),
    Memory,
}

#[derive(Debug, Clone)]
pub struct MailSettings {
    pub backend: MailBackend,
}

impl MailSettings {
    pub fn from_env() -> Self {
        let backend = match env::var("MAIL_BACKEND")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "webhook" => match env::var("MAIL_WEBHOOK_URL") {
                Ok(url) => MailBackend::Webhook(url),
                Err(_) => {
                    tracing::warn!("MAIL_BACKEND=webhook without MAIL_WEBHOOK_URL, using console");
                    MailBackend::Console
                }
            },
            "memory" => MailBackend::Memory,
            _ => MailBackend::Console,
        };
        Self { backend }
    }
}

/// Staff account created at startup when it does not exist yet.
#[derive(Debug, Clone)]
pub struct AdminBootstrap {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl AdminBootstrap {
    /// Present only when `BLOG_ADMIN_PASSWORD` is set.
    pub fn from_env() -> Option<Self> {
        let password = env::var("BLOG_ADMIN_PASSWORD").ok()?;
        Some(Self {
            username: env::var("BLOG_ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string()),
            email: env::var("BLOG_ADMIN_EMAIL").unwrap_or_else(|_| "admin@localhost".to_string()),
            password,
        })
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseSettings {
            url,
            max_connections: env_or("DB_MAX_CONNECTIONS", 20),
            min_connections: env_or("DB_MIN_CONNECTIONS", 2),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env_or("PORT", 8080),
            database,
            blog: BlogSettings::from_env(),
            mail: MailSettings::from_env(),
            admin: AdminBootstrap::from_env(),
        }
    }
}
