//! Completion reporting for a single delivery.
//!
//! Each send owns one [`Notifier`]. It is consumed by the first report, so a
//! delivery can produce at most one outcome; the paired [`Delivery`] future
//! resolves with that outcome.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use crate::error::{Error, Result, SendError};

/// Sender and primary recipients of a delivery, echoed in every report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Envelope {
    /// Sender address.
    pub from: String,
    /// Primary recipients. Carbon-copy recipients are not included.
    pub to: Vec<String>,
}

impl Envelope {
    /// Creates a new envelope.
    #[must_use]
    pub fn new(from: impl Into<String>, to: Vec<String>) -> Self {
        Self {
            from: from.into(),
            to,
        }
    }
}

/// Creates a connected notifier and delivery future for `envelope`.
#[must_use]
pub fn channel(envelope: Envelope) -> (Notifier, Delivery) {
    let (tx, rx) = oneshot::channel();
    let delivery = Delivery {
        rx,
        envelope: envelope.clone(),
    };
    (Notifier { envelope, tx }, delivery)
}

/// Reports the outcome of one delivery exactly once.
#[derive(Debug)]
pub struct Notifier {
    envelope: Envelope,
    tx: oneshot::Sender<std::result::Result<Envelope, SendError>>,
}

impl Notifier {
    /// Returns the envelope this notifier reports on.
    #[must_use]
    pub const fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Reports a successful delivery.
    pub fn success(self) {
        tracing::info!(from = %self.envelope.from, to = ?self.envelope.to, "Message delivered");
        let envelope = self.envelope;
        let _ = self.tx.send(Ok(envelope));
    }

    /// Reports a failed delivery.
    pub fn error(self, error: Error) {
        tracing::warn!(%error, from = %self.envelope.from, to = ?self.envelope.to, "Delivery failed");
        let _ = self.tx.send(Err(SendError::new(error, self.envelope)));
    }

    /// Reports `result` as success or failure.
    pub fn finish(self, result: Result<()>) {
        match result {
            Ok(()) => self.success(),
            Err(error) => self.error(error),
        }
    }
}

/// Resolves to the outcome of a delivery.
///
/// Yields [`Error::Abandoned`] if the delivery ended without reporting,
/// for example because its task was cancelled.
#[derive(Debug)]
#[must_use = "a delivery does nothing unless awaited"]
pub struct Delivery {
    rx: oneshot::Receiver<std::result::Result<Envelope, SendError>>,
    envelope: Envelope,
}

impl Future for Delivery {
    type Output = std::result::Result<Envelope, SendError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = &mut *self;
        Pin::new(&mut this.rx).poll(cx).map(|received| {
            received.unwrap_or_else(|_| {
                Err(SendError::new(
                    Error::Abandoned,
                    std::mem::take(&mut this.envelope),
                ))
            })
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn envelope() -> Envelope {
        Envelope::new("alice@example.com", vec!["bob@example.org".into()])
    }

    #[tokio::test]
    async fn success_resolves_with_envelope() {
        let (notifier, delivery) = channel(envelope());
        notifier.success();
        assert_eq!(delivery.await.unwrap(), envelope());
    }

    #[tokio::test]
    async fn error_carries_envelope_and_cause() {
        let (notifier, delivery) = channel(envelope());
        notifier.error(Error::ConnectionClosed);

        let err = delivery.await.unwrap_err();
        assert!(matches!(err.error, Error::ConnectionClosed));
        assert_eq!(err.envelope, envelope());
    }

    #[tokio::test]
    async fn finish_maps_result() {
        let (notifier, delivery) = channel(envelope());
        notifier.finish(Err(Error::NoReachableExchange { attempts: 2 }));
        assert!(matches!(
            delivery.await.unwrap_err().error,
            Error::NoReachableExchange { attempts: 2 }
        ));

        let (notifier, delivery) = channel(envelope());
        notifier.finish(Ok(()));
        assert!(delivery.await.is_ok());
    }

    #[tokio::test]
    async fn dropped_notifier_abandons_delivery() {
        let (notifier, delivery) = channel(envelope());
        drop(notifier);
        let err = delivery.await.unwrap_err();
        assert!(matches!(err.error, Error::Abandoned));
        assert_eq!(err.envelope, envelope());
    }
}
