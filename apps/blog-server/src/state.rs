//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::domain::User;
use blog_core::error::RepoError;
use blog_core::ports::{
    AuthError, Cache, CommentRepository, Mailer, PasswordService, PostRepository, TagRepository,
    UserRepository,
};
use blog_infra::{ConsoleMailer, InMemoryBlogStore, InMemoryCache, MemoryMailer, WebhookMailer};

use crate::config::{AdminBootstrap, AppConfig, BlogSettings, MailBackend, MailSettings};
use crate::templates::Templates;

#[cfg(feature = "postgres")]
use blog_infra::database::{
    DatabaseConfig, PostgresCommentRepository, PostgresPostRepository, PostgresTagRepository,
    PostgresUserRepository, connect,
};

/// Failures that abort startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Template error: {0}")]
    Templates(#[from] tera::Error),

    #[error("Admin bootstrap failed: {0}")]
    Repository(#[from] RepoError),

    #[error("Admin bootstrap failed: {0}")]
    Auth(#[from] AuthError),
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub mailer: Arc<dyn Mailer>,
    pub cache: Arc<dyn Cache>,
    pub templates: Arc<Templates>,
    pub settings: BlogSettings,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Result<Self, StartupError> {
        let mailer = build_mailer(&config.mail);

        #[cfg(feature = "postgres")]
        let state = match &config.database {
            Some(settings) => {
                let db_config = DatabaseConfig {
                    max_connections: settings.max_connections,
                    min_connections: settings.min_connections,
                    ..DatabaseConfig::new(settings.url.clone())
                };
                match connect(&db_config).await {
                    Ok(db) => Self {
                        users: Arc::new(PostgresUserRepository::new(db.clone())),
                        posts: Arc::new(PostgresPostRepository::new(db.clone())),
                        comments: Arc::new(PostgresCommentRepository::new(db.clone())),
                        tags: Arc::new(PostgresTagRepository::new(db)),
                        mailer,
                        cache: Arc::new(InMemoryCache::new()),
                        templates: Arc::new(Templates::new()?),
                        settings: config.blog.clone(),
                    },
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        Self::in_memory(config.blog.clone(), mailer)?
                    }
                }
            }
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory(config.blog.clone(), mailer)?
            }
        };

        #[cfg(not(feature = "postgres"))]
        let state = {
            tracing::info!("Running without postgres feature - using in-memory store");
            Self::in_memory(config.blog.clone(), mailer)?
        };

        tracing::info!("Application state initialized");
        Ok(state)
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory(settings: BlogSettings, mailer: Arc<dyn Mailer>) -> Result<Self, StartupError> {
        let store = Arc::new(InMemoryBlogStore::new());
        Ok(Self {
            users: store.clone(),
            posts: store.clone(),
            comments: store.clone(),
            tags: store,
            mailer,
            cache: Arc::new(InMemoryCache::new()),
            templates: Arc::new(Templates::new()?),
            settings,
        })
    }
}

fn build_mailer(settings: &MailSettings) -> Arc<dyn Mailer> {
    match &settings.backend {
        MailBackend::Console => Arc::new(ConsoleMailer),
        MailBackend::Webhook(url) => {
            tracing::info!("Mail relay configured");
            Arc::new(WebhookMailer::new(url.clone()))
        }
        MailBackend::Memory => Arc::new(MemoryMailer::new()),
    }
}

/// Create the configured staff account unless the username is taken.
pub async fn bootstrap_admin(
    users: &dyn UserRepository,
    passwords: &dyn PasswordService,
    admin: &AdminBootstrap,
) -> Result<(), StartupError> {
    if users.find_by_username(&admin.username).await?.is_some() {
        tracing::debug!(username = %admin.username, "Admin user already exists");
        return Ok(());
    }

    let hash = passwords.hash(&admin.password)?;
    let user = User::new(admin.username.clone(), admin.email.clone(), hash).staff();
    users.save(user).await?;

    tracing::info!(username = %admin.username, "Admin user created");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_infra::Argon2PasswordService;

    #[tokio::test]
    async fn test_bootstrap_admin_is_idempotent() {
        let store = InMemoryBlogStore::new();
        let passwords = Argon2PasswordService::new();
        let admin = AdminBootstrap {
            username: "admin".into(),
            email: "admin@example.com".into(),
            password: "s3cret-pass".into(),
        };

        bootstrap_admin(&store, &passwords, &admin).await.unwrap();
        bootstrap_admin(&store, &passwords, &admin).await.unwrap();

        let user = store.find_by_username("admin").await.unwrap().unwrap();
        assert!(user.is_staff);
        assert!(passwords.verify("s3cret-pass", &user.password_hash).unwrap());
    }
}
