//! Delivery configuration types.

use std::time::Duration;

/// Standard SMTP relay port.
pub const DEFAULT_PORT: u16 = 25;

/// Idle time allowed between inbound replies before a session is torn down.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(15);

/// Time allowed for each connection attempt before moving to the next exchange.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Delivery configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Port dialed on every exchange.
    pub port: u16,
    /// Idle timeout for the session.
    pub idle_timeout: Duration,
    /// Timeout for a single connection attempt.
    pub connect_timeout: Duration,
    /// Identity announced in HELO/EHLO. Defaults to the sender's domain.
    pub client_hostname: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            client_hostname: None,
        }
    }
}

impl Config {
    /// Creates a configuration builder.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Returns the HELO/EHLO identity for a sender domain.
    #[must_use]
    pub fn hello_name<'a>(&'a self, sender_domain: &'a str) -> &'a str {
        self.client_hostname.as_deref().unwrap_or(sender_domain)
    }
}

/// Builder for delivery configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the port.
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Sets the idle timeout.
    #[must_use]
    pub const fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.idle_timeout = timeout;
        self
    }

    /// Sets the per-attempt connection timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Overrides the HELO/EHLO identity.
    #[must_use]
    pub fn client_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.config.client_hostname = Some(hostname.into());
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> Config {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 25);
        assert_eq!(config.idle_timeout, Duration::from_secs(15));
        assert!(config.client_hostname.is_none());
    }

    #[test]
    fn test_builder() {
        let config = Config::builder()
            .port(2525)
            .idle_timeout(Duration::from_secs(5))
            .connect_timeout(Duration::from_secs(2))
            .client_hostname("relay.example.com")
            .build();

        assert_eq!(config.port, 2525);
        assert_eq!(config.idle_timeout, Duration::from_secs(5));
        assert_eq!(config.connect_timeout, Duration::from_secs(2));
        assert_eq!(config.hello_name("example.com"), "relay.example.com");
    }

    #[test]
    fn test_hello_name_defaults_to_sender_domain() {
        assert_eq!(Config::default().hello_name("example.com"), "example.com");
    }
}
