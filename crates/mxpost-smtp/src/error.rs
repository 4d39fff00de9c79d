//! Error types for delivery operations.

use std::io;
use std::time::Duration;

use crate::notifier::Envelope;

/// Result type alias for delivery operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Delivery error types.
///
/// Every variant is terminal for the send invocation that produced it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The exchange lookup failed or returned no candidates.
    #[error("Cannot resolve MX of {domain}: {reason}")]
    Resolution {
        /// Domain that was looked up.
        domain: String,
        /// Why the lookup produced nothing usable.
        reason: String,
    },

    /// The system resolver could not be initialized.
    #[error("Resolver initialization failed: {0}")]
    ResolverInit(#[source] trust_dns_resolver::error::ResolveError),

    /// Every candidate exchange refused or failed the connection.
    #[error("Cannot connect to any SMTP server ({attempts} attempted)")]
    NoReachableExchange {
        /// Number of candidates that were dialed.
        attempts: usize,
    },

    /// The remote exchange answered with a reply code of 400 or above.
    #[error("SMTP error {code}: {reply}")]
    Protocol {
        /// Reply code (e.g., 550).
        code: u16,
        /// Reply text exactly as received, lines joined by `\n`.
        reply: String,
    },

    /// No inbound data arrived within the idle timeout.
    #[error("Timed out after {0:?} without a reply")]
    Timeout(Duration),

    /// The server asked for authentication but no credentials were supplied.
    #[error("Server requested authentication but no credentials were supplied: {challenge}")]
    AuthenticationUnavailable {
        /// The challenge line as received.
        challenge: String,
    },

    /// The server closed the connection before the dialog completed.
    #[error("Connection closed by server")]
    ConnectionClosed,

    /// A reply line exceeded the maximum accepted length.
    #[error("Reply line exceeds {0} bytes")]
    LineTooLong(usize),

    /// I/O error on the transport.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The delivery task ended without reporting an outcome.
    #[error("Delivery task ended without reporting an outcome")]
    Abandoned,
}

impl Error {
    /// Creates a resolution error for `domain`.
    #[must_use]
    pub fn resolution(domain: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Resolution {
            domain: domain.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if this is a permanent protocol error (5xx).
    #[must_use]
    pub const fn is_permanent(&self) -> bool {
        matches!(self, Self::Protocol { code, .. } if *code >= 500 && *code < 600)
    }

    /// Returns true if this is a transient protocol error (4xx).
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Protocol { code, .. } if *code >= 400 && *code < 500)
    }
}

/// A failed delivery, carrying the original sender and recipients.
#[derive(Debug, thiserror::Error)]
#[error("delivery from {} failed: {error}", envelope.from)]
pub struct SendError {
    /// What went wrong.
    #[source]
    pub error: Error,
    /// The sender and recipients of the failed delivery.
    pub envelope: Envelope,
}

impl SendError {
    /// Creates a new send error.
    #[must_use]
    pub const fn new(error: Error, envelope: Envelope) -> Self {
        Self { error, envelope }
    }
}
