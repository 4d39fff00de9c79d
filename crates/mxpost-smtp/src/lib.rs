//! # mxpost-smtp
//!
//! Fire-and-forget SMTP delivery straight to the recipient domain's mail
//! exchanges.
//!
//! ## Features
//!
//! - **Exchange discovery**: MX lookup with ascending-priority ordering
//! - **Connection fallback**: candidates are dialed one at a time until one
//!   accepts
//! - **Reply-driven session**: every step of the dialog is chosen by the
//!   server's reply code alone; progress lives in a pre-built command queue
//! - **Single outcome**: each send reports success or failure exactly once,
//!   always with the original sender and recipients
//!
//! ## Quick Start
//!
//! ```no_run
//! use mxpost_smtp::{Config, Mailer, OutgoingMessage};
//!
//! #[tokio::main]
//! async fn main() -> mxpost_smtp::Result<()> {
//!     let mailer = Mailer::new(Config::default())?;
//!
//!     let message = OutgoingMessage::new("alice@example.com", "Hello", "<p>Hi Bob</p>")
//!         .to("bob@example.org");
//!
//!     match mailer.send(None, message).await {
//!         Ok(envelope) => println!("delivered to {:?}", envelope.to),
//!         Err(e) => eprintln!("{e}"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Session
//!
//! ```text
//! 220 ──→ EHLO/HELO
//! 250 ──→ [AUTH PLAIN] → MAIL FROM → RCPT TO… → DATA → QUIT → end
//! 334 ──→ credential response
//! 354 ──→ message, blank line, "."
//! ≥400 ─→ close, report failure
//! ```
//!
//! ## Modules
//!
//! - [`command`]: SMTP commands and the per-delivery command queue
//! - [`parser`]: Reply line parser
//! - [`resolver`]: Mail exchange discovery
//! - [`session`]: Line framing, state machine, and async driver
//! - [`transport`]: Connections and exchange fallback
//! - [`types`]: Reply codes and credentials

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod command;
mod config;
mod error;
mod mailer;
mod message;
pub mod notifier;
pub mod parser;
pub mod resolver;
pub mod session;
pub mod transport;
pub mod types;

pub use config::{
    Config, ConfigBuilder, DEFAULT_CONNECT_TIMEOUT, DEFAULT_IDLE_TIMEOUT, DEFAULT_PORT,
};
pub use error::{Error, Result, SendError};
pub use mailer::{Mailer, send};
pub use message::OutgoingMessage;
pub use mxpost_mime::ContentType;
pub use notifier::{Delivery, Envelope};
pub use resolver::{DnsResolver, ExchangeCandidate, LookupMx};
pub use transport::{Connector, TcpConnector};
pub use types::{Credentials, Reply, ReplyCode};
