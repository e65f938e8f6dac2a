//! Domain entities - the core business objects.

mod comment;
mod post;
mod tag;
mod user;

pub use comment::Comment;
pub use post::{Post, PostStatus, day_bounds};
pub use tag::{Tag, normalize_tag_names, rank_by_shared_tags};
pub use user::User;
