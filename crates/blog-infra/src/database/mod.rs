//! PostgreSQL storage via SeaORM.

mod connections;
pub mod entity;
mod post_repo;
mod postgres_base;
mod postgres_repo;

pub use connections::{DatabaseConfig, connect};
pub use post_repo::PostgresPostRepository;
pub use postgres_repo::{PostgresCommentRepository, PostgresTagRepository, PostgresUserRepository};

#[cfg(test)]
mod tests;
