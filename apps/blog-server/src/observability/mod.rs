//! Observability: request IDs and error alerting.

mod alert;
mod request_id;

pub use alert::{AlertConfig, AlertLayer};
pub use request_id::RequestIdMiddleware;
