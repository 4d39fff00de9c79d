//! Reply-driven session state machine.
//!
//! The machine has no phase counter: every transition is chosen by the reply
//! code alone, and progress through the dialog is recorded solely by what is
//! left in the [`CommandQueue`].

use mxpost_mime::RenderedMessage;

use crate::command::{Command, CommandQueue, QueueItem};
use crate::error::Error;
use crate::parser::parse_line;
use crate::types::{Credentials, Reply, ReplyCode};

/// Terminal result of a session.
#[derive(Debug)]
pub enum Outcome {
    /// The command queue drained after an accepted reply.
    Delivered,
    /// The session must be closed and the delivery reported as failed.
    Failed(Error),
}

/// What to do in response to one inbound line.
#[derive(Debug, Default)]
pub struct Transition {
    /// Bytes to write to the transport, if any.
    pub output: Option<Vec<u8>>,
    /// Terminal outcome, if the session ends here.
    pub outcome: Option<Outcome>,
}

impl Transition {
    /// No output, session continues.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    fn send(command: &Command) -> Self {
        tracing::trace!(%command, "sending");
        Self {
            output: Some(command.serialize()),
            outcome: None,
        }
    }

    const fn finish(outcome: Outcome) -> Self {
        Self {
            output: None,
            outcome: Some(outcome),
        }
    }

    /// Returns true if the session ends with this transition.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }
}

/// State owned by one delivery's SMTP dialog.
#[derive(Debug)]
pub struct Session {
    hostname: String,
    queue: CommandQueue,
    message: RenderedMessage,
    credentials: Option<Credentials>,
    continuation: Vec<String>,
    finished: bool,
}

impl Session {
    /// Creates a session.
    ///
    /// `hostname` is announced in HELO/EHLO; `message` is transmitted after
    /// the server accepts `DATA`.
    #[must_use]
    pub fn new(
        hostname: impl Into<String>,
        queue: CommandQueue,
        message: RenderedMessage,
        credentials: Option<Credentials>,
    ) -> Self {
        Self {
            hostname: hostname.into(),
            queue,
            message,
            credentials,
            continuation: Vec::new(),
            finished: false,
        }
    }

    /// Returns the commands not yet sent.
    #[must_use]
    pub const fn queue(&self) -> &CommandQueue {
        &self.queue
    }

    /// Returns true once a terminal outcome has been produced.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Feeds one inbound line (without CRLF) to the machine.
    ///
    /// Continuation lines of a multi-line reply are held until the final line
    /// arrives. Lines without a reply code and lines arriving after a terminal
    /// outcome produce no action.
    pub fn on_line(&mut self, line: &str) -> Transition {
        if self.finished {
            tracing::trace!(line, "ignoring line after session end");
            return Transition::none();
        }

        tracing::trace!(line, "received");

        let Some(parsed) = parse_line(line) else {
            tracing::warn!(line, "ignoring line without reply code");
            return Transition::none();
        };

        self.continuation.push(line.to_string());
        if !parsed.is_last {
            return Transition::none();
        }

        let reply = Reply::new(parsed.code, std::mem::take(&mut self.continuation));
        let transition = self.on_reply(&reply);
        self.finished = transition.is_terminal();
        transition
    }

    fn on_reply(&mut self, reply: &Reply) -> Transition {
        match reply.code {
            ReplyCode::SERVICE_READY => self.greet(reply),
            code if code.is_accepted() => self.advance(),
            ReplyCode::AUTH_CONTINUE => self.answer_challenge(reply),
            ReplyCode::START_DATA => self.send_message(),
            code if code.is_error() => Transition::finish(Outcome::Failed(Error::Protocol {
                code: code.as_u16(),
                reply: reply.raw_text(),
            })),
            code => {
                tracing::debug!(%code, "ignoring reply");
                Transition::none()
            }
        }
    }

    fn greet(&self, greeting: &Reply) -> Transition {
        let hostname = self.hostname.clone();
        let command = if greeting.advertises_esmtp() {
            Command::Ehlo { hostname }
        } else {
            Command::Helo { hostname }
        };
        Transition::send(&command)
    }

    fn advance(&mut self) -> Transition {
        let mut transition = match self.queue.pop() {
            Some(QueueItem::Command(command)) => Transition::send(&command),
            Some(QueueItem::End) | None => Transition::none(),
        };

        if self.queue.is_empty() {
            transition.outcome = Some(Outcome::Delivered);
        }

        transition
    }

    fn answer_challenge(&self, challenge: &Reply) -> Transition {
        match &self.credentials {
            Some(credentials) => Transition::send(&Command::AuthResponse {
                token: credentials.plain_token(),
            }),
            None => Transition::finish(Outcome::Failed(Error::AuthenticationUnavailable {
                challenge: challenge.raw_text(),
            })),
        }
    }

    fn send_message(&self) -> Transition {
        let payload = data_payload(self.message.as_str());
        tracing::trace!(bytes = payload.len(), "sending message data");
        Transition {
            output: Some(payload),
            outcome: None,
        }
    }
}

/// Builds the bytes sent after 354: the message text, a blank line and the
/// end-of-data marker. Lines starting with `.` are dot-stuffed.
fn data_payload(text: &str) -> Vec<u8> {
    let mut buf = Vec::with_capacity(text.len() + 8);

    for line in text.split("\r\n") {
        if line.starts_with('.') {
            buf.push(b'.');
        }
        buf.extend_from_slice(line.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    buf.extend_from_slice(b"\r\n.\r\n");
    buf
}
