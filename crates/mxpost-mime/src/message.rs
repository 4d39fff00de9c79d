//! Outgoing message model and rendering.

use crate::content_type::ContentType;
use crate::encoding::{decode_base64, encode_base64_wrapped, encode_rfc2047, normalize_line_endings};
use crate::error::Result;
use chrono::{DateTime, Utc};
use std::fmt;
use std::fmt::Write as _;

/// A message to be rendered for transmission.
///
/// Addresses are taken verbatim; no syntax validation is performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Sender address.
    pub from: String,
    /// Primary recipients.
    pub to: Vec<String>,
    /// Carbon-copy recipients.
    pub cc: Vec<String>,
    /// Subject line.
    pub subject: String,
    /// Raw body text.
    pub body: String,
    /// Body content type. The charset is always rendered as UTF-8.
    pub content_type: ContentType,
}

impl Message {
    /// Creates a new message with a `text/html` body and no recipients.
    #[must_use]
    pub fn new(
        from: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: Vec::new(),
            cc: Vec::new(),
            subject: subject.into(),
            body: body.into(),
            content_type: ContentType::default(),
        }
    }

    /// Adds a recipient.
    #[must_use]
    pub fn to(mut self, recipient: impl Into<String>) -> Self {
        self.to.push(recipient.into());
        self
    }

    /// Adds a CC recipient.
    #[must_use]
    pub fn cc(mut self, recipient: impl Into<String>) -> Self {
        self.cc.push(recipient.into());
        self
    }

    /// Sets the body content type.
    #[must_use]
    pub fn content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }

    /// Returns the domain suffix of the sender address.
    #[must_use]
    pub fn sender_domain(&self) -> &str {
        domain_of(&self.from)
    }
}

/// Returns everything after the first `@` of an address, or the whole
/// address when it has none.
#[must_use]
pub fn domain_of(address: &str) -> &str {
    address
        .split_once('@')
        .map_or(address, |(_, domain)| domain)
}

/// Builds a Message-ID from a timestamp and the sender's domain.
///
/// Uniqueness is best-effort: two messages rendered in the same millisecond
/// from the same domain share an ID.
#[must_use]
pub fn message_id(at: DateTime<Utc>, domain: &str) -> String {
    format!("<{}@{domain}>", at.timestamp_millis())
}

/// A message rendered to the exact text sent after `DATA`.
///
/// Consists of CRLF-terminated header lines, one blank line, and the
/// Base64-encoded body. The body carries no trailing line break.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    text: String,
    body_start: usize,
}

impl RenderedMessage {
    /// Returns the full rendered text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the full rendered text as bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Returns the header block, each line terminated by CRLF.
    #[must_use]
    pub fn headers(&self) -> &str {
        &self.text[..self.body_start - 2]
    }

    /// Returns the encoded body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.text[self.body_start..]
    }

    /// Decodes the Base64 body back to text.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid Base64 or not UTF-8.
    pub fn decode_body(&self) -> Result<String> {
        let decoded = decode_base64(self.body())?;
        String::from_utf8(decoded).map_err(Into::into)
    }

    /// Returns the length of the rendered text in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns true if nothing was rendered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for RenderedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Renders a message using the current time for its Message-ID.
#[must_use]
pub fn compose(message: &Message) -> RenderedMessage {
    compose_at(message, Utc::now())
}

/// Renders a message using `at` for its Message-ID.
///
/// Pure and deterministic: the same message and timestamp always produce
/// byte-identical output.
#[must_use]
pub fn compose_at(message: &Message, at: DateTime<Utc>) -> RenderedMessage {
    let mut text = String::new();

    let _ = write!(text, "From: {}\r\n", message.from);
    let _ = write!(text, "To: {}\r\n", message.to.join(", "));

    if !message.cc.is_empty() {
        let _ = write!(text, "Cc: {}\r\n", message.cc.join(", "));
    }

    let _ = write!(text, "Subject: {}\r\n", encode_rfc2047(&message.subject, "utf-8"));
    text.push_str("MIME-Version: 1.0\r\n");
    let _ = write!(
        text,
        "Message-ID: {}\r\n",
        message_id(at, message.sender_domain())
    );
    let _ = write!(
        text,
        "Content-Type: {}\r\n",
        message.content_type.clone().with_utf8_charset()
    );
    text.push_str("Content-Transfer-Encoding: base64\r\n");

    // Blank line between headers and body
    text.push_str("\r\n");
    let body_start = text.len();

    let body = normalize_line_endings(&message.body);
    text.push_str(&encode_base64_wrapped(body.as_bytes()));

    RenderedMessage { text, body_start }
}
