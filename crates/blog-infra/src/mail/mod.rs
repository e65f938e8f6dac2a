//! Mail transports for the share-by-email feature.

mod console;
mod memory;
mod webhook;

pub use console::ConsoleMailer;
pub use memory::MemoryMailer;
pub use webhook::WebhookMailer;
