//! Pre-computed command queue for one delivery.

use std::collections::VecDeque;

use super::Command;
use crate::types::Credentials;

/// One entry of a [`CommandQueue`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueItem {
    /// A command to send.
    Command(Command),
    /// Sentinel after QUIT. Dequeuing it sends nothing and drains the queue.
    End,
}

/// Ordered commands issued one per accepted reply.
///
/// Built once up front and only ever consumed from the front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandQueue {
    items: VecDeque<QueueItem>,
}

impl CommandQueue {
    /// Builds the queue for a delivery.
    ///
    /// Order: `AUTH PLAIN` (when credentials are present), `MAIL FROM`, one
    /// `RCPT TO` per recipient, `DATA`, `QUIT`, then the [`QueueItem::End`]
    /// sentinel.
    #[must_use]
    pub fn build<'a>(
        from: &str,
        recipients: impl IntoIterator<Item = &'a str>,
        credentials: Option<&Credentials>,
    ) -> Self {
        let mut items = VecDeque::new();

        if let Some(credentials) = credentials {
            items.push_back(QueueItem::Command(Command::AuthPlain {
                token: credentials.plain_token(),
            }));
        }

        items.push_back(QueueItem::Command(Command::MailFrom {
            from: from.to_string(),
        }));

        for to in recipients {
            items.push_back(QueueItem::Command(Command::RcptTo { to: to.to_string() }));
        }

        items.push_back(QueueItem::Command(Command::Data));
        items.push_back(QueueItem::Command(Command::Quit));
        items.push_back(QueueItem::End);

        Self { items }
    }

    /// Removes and returns the front item.
    pub fn pop(&mut self) -> Option<QueueItem> {
        self.items.pop_front()
    }

    /// Returns the front item without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&QueueItem> {
        self.items.front()
    }

    /// Returns the number of pending items, sentinel included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<QueueItem> for CommandQueue {
    fn from_iter<I: IntoIterator<Item = QueueItem>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn commands(queue: &mut CommandQueue) -> Vec<String> {
        let mut out = Vec::new();
        while let Some(item) = queue.pop() {
            match item {
                QueueItem::Command(cmd) => out.push(cmd.to_string()),
                QueueItem::End => out.push(String::new()),
            }
        }
        out
    }

    #[test]
    fn test_without_credentials() {
        let mut queue = CommandQueue::build(
            "alice@example.com",
            ["bob@example.org", "carol@example.net"],
            None,
        );

        assert_eq!(queue.len(), 6);
        assert_eq!(
            commands(&mut queue),
            vec![
                "MAIL FROM:<alice@example.com>",
                "RCPT TO:<bob@example.org>",
                "RCPT TO:<carol@example.net>",
                "DATA",
                "QUIT",
                "",
            ]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_auth_comes_first() {
        let creds = Credentials::new("user", "pass");
        let mut queue = CommandQueue::build("alice@example.com", ["bob@example.org"], Some(&creds));

        assert_eq!(
            queue.pop(),
            Some(QueueItem::Command(Command::AuthPlain {
                token: creds.plain_token()
            }))
        );
        assert!(matches!(
            queue.peek(),
            Some(QueueItem::Command(Command::MailFrom { .. }))
        ));
    }

    #[test]
    fn test_ends_with_sentinel() {
        let mut queue = CommandQueue::build("a@example.com", ["b@example.com"], None);
        let mut last = None;
        while let Some(item) = queue.pop() {
            last = Some(item);
        }
        assert_eq!(last, Some(QueueItem::End));
    }
}
