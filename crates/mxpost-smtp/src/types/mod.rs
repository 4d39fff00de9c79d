//! Core SMTP types.

mod credentials;
mod reply;

pub use credentials::Credentials;
pub use reply::{Reply, ReplyCode};
