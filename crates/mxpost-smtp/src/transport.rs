//! Transport connections and ordered exchange fallback.

use std::future::Future;
use std::io;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;

use crate::config::DEFAULT_CONNECT_TIMEOUT;
use crate::error::{Error, Result};
use crate::resolver::ExchangeCandidate;

/// Opens byte-stream connections to remote exchanges.
pub trait Connector: Send + Sync {
    /// Connected stream type.
    type Stream: AsyncRead + AsyncWrite + Unpin + Send + 'static;

    /// Connects to `host:port`.
    fn connect(&self, host: &str, port: u16) -> impl Future<Output = io::Result<Self::Stream>> + Send;
}

/// Plain TCP connector with a per-attempt timeout.
#[derive(Debug, Clone, Copy)]
pub struct TcpConnector {
    connect_timeout: Duration,
}

impl TcpConnector {
    /// Creates a connector that abandons attempts after `connect_timeout`.
    #[must_use]
    pub const fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }
}

impl Default for TcpConnector {
    fn default() -> Self {
        Self::new(DEFAULT_CONNECT_TIMEOUT)
    }
}

impl Connector for TcpConnector {
    type Stream = TcpStream;

    async fn connect(&self, host: &str, port: u16) -> io::Result<TcpStream> {
        tokio::time::timeout(self.connect_timeout, TcpStream::connect((host, port)))
            .await
            .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "connection attempt timed out"))?
    }
}

/// Dials `candidates` one at a time, in order, and returns the first stream
/// that connects together with the candidate that accepted it.
///
/// A failed attempt (refused, unreachable, timed out) moves on to the next
/// candidate. No candidate is dialed twice and none are dialed after one
/// succeeds.
///
/// # Errors
///
/// Returns [`Error::NoReachableExchange`] once every candidate has failed.
pub async fn connect_with_fallback<'a, C: Connector>(
    connector: &C,
    candidates: &'a [ExchangeCandidate],
    port: u16,
) -> Result<(C::Stream, &'a ExchangeCandidate)> {
    for candidate in candidates {
        tracing::debug!(host = %candidate.host, priority = candidate.priority, port, "connecting");

        match connector.connect(&candidate.host, port).await {
            Ok(stream) => {
                tracing::debug!(host = %candidate.host, "connected");
                return Ok((stream, candidate));
            }
            Err(e) => {
                tracing::warn!(?e, host = %candidate.host, "Connection attempt failed");
            }
        }
    }

    Err(Error::NoReachableExchange {
        attempts: candidates.len(),
    })
}
