//! Delivery entry points.

use std::sync::Arc;

use tokio::io::AsyncWriteExt;

use crate::config::Config;
use crate::error::{Result, SendError};
use crate::message::OutgoingMessage;
use crate::notifier::{self, Delivery, Envelope};
use crate::resolver::{self, DnsResolver, LookupMx};
use crate::session::{self, Session};
use crate::transport::{Connector, TcpConnector, connect_with_fallback};

/// Sends messages directly to the recipient domain's exchanges.
///
/// Cloning is cheap; clones share the resolver and connector. Every send owns
/// its own connection, buffer and command queue.
#[derive(Debug)]
pub struct Mailer<R = DnsResolver, C = TcpConnector> {
    resolver: Arc<R>,
    connector: Arc<C>,
    config: Config,
}

impl<R, C> Clone for Mailer<R, C> {
    fn clone(&self) -> Self {
        Self {
            resolver: Arc::clone(&self.resolver),
            connector: Arc::clone(&self.connector),
            config: self.config.clone(),
        }
    }
}

impl Mailer {
    /// Creates a mailer using the system resolver and plain TCP.
    ///
    /// # Errors
    ///
    /// Returns an error if the system resolver configuration cannot be read.
    pub fn new(config: Config) -> Result<Self> {
        let resolver = DnsResolver::from_system_conf()?;
        let connector = TcpConnector::new(config.connect_timeout);
        Ok(Self::with_parts(resolver, connector, config))
    }
}

impl<R, C> Mailer<R, C>
where
    R: LookupMx + 'static,
    C: Connector + 'static,
{
    /// Creates a mailer from an explicit resolver and connector.
    #[must_use]
    pub fn with_parts(resolver: R, connector: C, config: Config) -> Self {
        Self {
            resolver: Arc::new(resolver),
            connector: Arc::new(connector),
            config,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Starts delivering `message` in the background.
    ///
    /// Exchanges are looked up for `exchange` when given, otherwise for the
    /// sender's own domain. The returned future resolves exactly once with
    /// the outcome; dropping it does not cancel the delivery.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn send(&self, exchange: Option<&str>, message: OutgoingMessage) -> Delivery {
        let (notifier, delivery) = notifier::channel(message.envelope());
        let mailer = self.clone();
        let exchange = exchange.map(str::to_owned);

        tokio::spawn(async move {
            let result = mailer.run(exchange.as_deref(), &message).await;
            notifier.finish(result);
        });

        delivery
    }

    /// Delivers `message` and waits for the outcome.
    ///
    /// # Errors
    ///
    /// Returns a [`SendError`] carrying the cause and the message's envelope.
    pub async fn deliver(
        &self,
        exchange: Option<&str>,
        message: &OutgoingMessage,
    ) -> std::result::Result<Envelope, SendError> {
        let (notifier, delivery) = notifier::channel(message.envelope());
        notifier.finish(self.run(exchange, message).await);
        delivery.await
    }

    async fn run(&self, exchange: Option<&str>, message: &OutgoingMessage) -> Result<()> {
        let domain = exchange.unwrap_or_else(|| message.sender_domain());
        let candidates = resolver::resolve(self.resolver.as_ref(), domain).await?;

        let (mut stream, chosen) =
            connect_with_fallback(self.connector.as_ref(), &candidates, self.config.port).await?;
        tracing::debug!(host = %chosen.host, priority = chosen.priority, "Exchange accepted connection");

        let mut session = Session::new(
            self.config.hello_name(message.sender_domain()),
            message.command_queue(),
            message.render(),
            message.credentials_ref().cloned(),
        );

        let result = session::drive(&mut stream, &mut session, self.config.idle_timeout).await;

        if let Err(e) = stream.shutdown().await {
            tracing::debug!(?e, "Error closing connection");
        }

        result
    }
}

/// Starts delivering `message` with the default configuration and the
/// system resolver.
///
/// # Errors
///
/// Returns an error if the system resolver configuration cannot be read.
pub fn send(exchange: Option<&str>, message: OutgoingMessage) -> Result<Delivery> {
    Ok(Mailer::new(Config::default())?.send(exchange, message))
}
