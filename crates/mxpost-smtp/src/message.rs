//! Outgoing message handed to the mailer.

use mxpost_mime::{ContentType, Message, RenderedMessage};

use crate::command::CommandQueue;
use crate::notifier::Envelope;
use crate::types::Credentials;

/// A message to deliver, with optional relay credentials.
///
/// Owned by a single send for its whole duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    message: Message,
    credentials: Option<Credentials>,
}

impl OutgoingMessage {
    /// Creates a new outgoing message with no recipients.
    #[must_use]
    pub fn new(
        from: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            message: Message::new(from, subject, body),
            credentials: None,
        }
    }

    /// Adds a recipient.
    #[must_use]
    pub fn to(mut self, recipient: impl Into<String>) -> Self {
        self.message = self.message.to(recipient);
        self
    }

    /// Adds a CC recipient.
    #[must_use]
    pub fn cc(mut self, recipient: impl Into<String>) -> Self {
        self.message = self.message.cc(recipient);
        self
    }

    /// Sets the body content type.
    #[must_use]
    pub fn content_type(mut self, content_type: ContentType) -> Self {
        self.message = self.message.content_type(content_type);
        self
    }

    /// Authenticates with `username` and `password` before sending.
    ///
    /// Ignored unless both are non-empty.
    #[must_use]
    pub fn credentials(mut self, username: &str, password: &str) -> Self {
        self.credentials = Credentials::from_parts(Some(username), Some(password));
        self
    }

    /// Returns the sender address.
    #[must_use]
    pub fn from(&self) -> &str {
        &self.message.from
    }

    /// Returns the domain of the sender address.
    #[must_use]
    pub fn sender_domain(&self) -> &str {
        self.message.sender_domain()
    }

    /// Returns the relay credentials, if any.
    #[must_use]
    pub const fn credentials_ref(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Returns the sender and primary recipients reported on completion.
    #[must_use]
    pub fn envelope(&self) -> Envelope {
        Envelope::new(self.message.from.clone(), self.message.to.clone())
    }

    /// Returns every envelope recipient: `to` followed by `cc`.
    pub fn recipients(&self) -> impl Iterator<Item = &str> {
        self.message
            .to
            .iter()
            .chain(&self.message.cc)
            .map(String::as_str)
    }

    /// Builds the command queue for this message.
    #[must_use]
    pub fn command_queue(&self) -> CommandQueue {
        CommandQueue::build(
            &self.message.from,
            self.recipients(),
            self.credentials.as_ref(),
        )
    }

    /// Renders the message for transmission.
    #[must_use]
    pub fn render(&self) -> RenderedMessage {
        mxpost_mime::compose(&self.message)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::command::{Command, QueueItem};

    fn sample() -> OutgoingMessage {
        OutgoingMessage::new("alice@example.com", "Hello", "<p>Hi</p>")
            .to("bob@example.org")
            .to("carol@example.net")
            .cc("dave@example.com")
    }

    #[test]
    fn test_recipients_list_to_before_cc() {
        let message = sample();
        let recipients: Vec<&str> = message.recipients().collect();
        assert_eq!(
            recipients,
            vec!["bob@example.org", "carol@example.net", "dave@example.com"]
        );
    }

    #[test]
    fn test_envelope_excludes_cc() {
        let envelope = sample().envelope();
        assert_eq!(envelope.from, "alice@example.com");
        assert_eq!(envelope.to, vec!["bob@example.org", "carol@example.net"]);
    }

    #[test]
    fn test_empty_credentials_are_dropped() {
        assert!(sample().credentials("", "secret").credentials_ref().is_none());
        assert!(sample().credentials("user", "").credentials_ref().is_none());
        assert_eq!(
            sample()
                .credentials("user", "secret")
                .credentials_ref()
                .unwrap()
                .username(),
            "user"
        );
    }

    #[test]
    fn test_command_queue_includes_cc() {
        let mut queue = sample().command_queue();
        let mut rcpts = Vec::new();
        while let Some(item) = queue.pop() {
            if let QueueItem::Command(Command::RcptTo { to }) = item {
                rcpts.push(to);
            }
        }
        assert_eq!(
            rcpts,
            vec!["bob@example.org", "carol@example.net", "dave@example.com"]
        );
    }

    #[test]
    fn test_render_uses_html_by_default() {
        let rendered = sample().render();
        assert!(
            rendered
                .headers()
                .contains("Content-Type: text/html; charset=utf-8\r\n")
        );
        assert!(rendered.headers().contains("Cc: dave@example.com\r\n"));
        assert_eq!(rendered.decode_body().unwrap(), "<p>Hi</p>");
    }

    #[test]
    fn test_sender_domain() {
        assert_eq!(sample().sender_domain(), "example.com");
        assert_eq!(sample().from(), "alice@example.com");
    }
}
