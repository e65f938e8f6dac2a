//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`:
//! storage, mail transports, authentication, caching and rate limiting.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No database, in-memory store only
//! - `postgres` - PostgreSQL storage via SeaORM
//! - `rate-limit` - Rate limiting via governor

pub mod auth;
pub mod cache;
pub mod mail;
pub mod memory;

#[cfg(feature = "postgres")]
pub mod database;

#[cfg(feature = "rate-limit")]
pub mod rate_limit;

// Re-exports - In-Memory
pub use cache::InMemoryCache;
pub use memory::InMemoryBlogStore;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use mail::{ConsoleMailer, MemoryMailer, WebhookMailer};

#[cfg(feature = "postgres")]
pub use database::{
    DatabaseConfig, PostgresCommentRepository, PostgresPostRepository, PostgresTagRepository,
    PostgresUserRepository,
};

#[cfg(feature = "rate-limit")]
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};
