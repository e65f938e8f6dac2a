//! # Blog Core
//!
//! The domain layer of the blog service.
//! Posts, comments, tags and the rules around them, with zero infrastructure dependencies.

pub mod admin;
pub mod domain;
pub mod error;
pub mod forms;
pub mod pagination;
pub mod ports;
pub mod search;

pub use error::DomainError;
pub use pagination::{InvalidPage, Page, PageRequest};
