//! # mxpost-mime
//!
//! Renders an outgoing message into the text blob transmitted after `DATA`.
//!
//! ## Features
//!
//! - **Fixed header order**: From, To, Cc, Subject, MIME-Version, Message-ID,
//!   Content-Type, Content-Transfer-Encoding
//! - **Base64 bodies**: line endings are normalized to CRLF before encoding
//! - **Encoded subjects**: non-ASCII subjects become RFC 2047 encoded-words
//! - **Deterministic output**: [`compose_at`] renders byte-identical output for
//!   the same message and timestamp
//!
//! ## Quick Start
//!
//! ```
//! use mxpost_mime::{Message, compose};
//!
//! let message = Message::new("alice@example.com", "Hello", "Hi Bob!\nSee you.")
//!     .to("bob@example.org");
//!
//! let rendered = compose(&message);
//! assert!(rendered.as_str().starts_with("From: alice@example.com\r\n"));
//! assert_eq!(rendered.decode_body().unwrap(), "Hi Bob!\r\nSee you.");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod content_type;
mod error;
mod message;

pub mod encoding;

pub use content_type::ContentType;
pub use error::{Error, Result};
pub use message::{Message, RenderedMessage, compose, compose_at, domain_of, message_id};
