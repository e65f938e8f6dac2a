//! SeaORM entities mirroring the migration schema.

pub mod comment;
pub mod post;
pub mod post_tag;
pub mod tag;
pub mod user;
