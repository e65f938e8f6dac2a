//! # Blog Shared
//!
//! Wire types of the admin JSON API and RFC 7807 error bodies.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
