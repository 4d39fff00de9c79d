//! Mail exchange discovery.
//!
//! Lookups go through the [`LookupMx`] trait so tests can substitute a stub
//! for the system resolver.

use std::future::Future;

use trust_dns_resolver::TokioAsyncResolver;
use trust_dns_resolver::error::ResolveErrorKind;

use crate::error::{Error, Result};

/// A remote host willing to accept mail for a domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeCandidate {
    /// Host name to dial.
    pub host: String,
    /// Preference; lower values are tried first.
    pub priority: u16,
}

impl ExchangeCandidate {
    /// Creates a new candidate.
    #[must_use]
    pub fn new(host: impl Into<String>, priority: u16) -> Self {
        Self {
            host: host.into(),
            priority,
        }
    }
}

/// Source of MX records.
pub trait LookupMx: Send + Sync {
    /// Returns the exchanges for `domain` in the order the lookup produced them.
    fn lookup_mx(
        &self,
        domain: &str,
    ) -> impl Future<Output = Result<Vec<ExchangeCandidate>>> + Send;
}

/// Resolves `domain` to its exchanges, most preferred first.
///
/// Candidates with equal priority keep the order the lookup returned them in.
///
/// # Errors
///
/// Returns [`Error::Resolution`] if the lookup fails or yields no exchanges.
pub async fn resolve<L: LookupMx>(lookup: &L, domain: &str) -> Result<Vec<ExchangeCandidate>> {
    let mut candidates = lookup.lookup_mx(domain).await?;

    if candidates.is_empty() {
        return Err(Error::resolution(domain, "no exchanges found"));
    }

    // sort_by_key is stable, so ties keep lookup order
    candidates.sort_by_key(|candidate| candidate.priority);
    tracing::debug!(domain, count = candidates.len(), "resolved exchanges");

    Ok(candidates)
}

/// MX lookup backed by the system DNS configuration.
#[derive(Clone)]
pub struct DnsResolver {
    inner: TokioAsyncResolver,
}

impl DnsResolver {
    /// Creates a resolver from the system configuration (`/etc/resolv.conf`
    /// on Unix).
    ///
    /// # Errors
    ///
    /// Returns an error if the system configuration cannot be read.
    pub fn from_system_conf() -> Result<Self> {
        let inner = TokioAsyncResolver::tokio_from_system_conf().map_err(Error::ResolverInit)?;
        Ok(Self { inner })
    }
}

impl std::fmt::Debug for DnsResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DnsResolver").finish_non_exhaustive()
    }
}

impl LookupMx for DnsResolver {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<ExchangeCandidate>> {
        let lookup = match self.inner.mx_lookup(domain).await {
            Ok(lookup) => lookup,
            Err(err) => {
                let reason = match err.kind() {
                    ResolveErrorKind::NoRecordsFound { .. } => "no MX records".to_string(),
                    _ => err.to_string(),
                };
                return Err(Error::resolution(domain, reason));
            }
        };

        Ok(lookup
            .iter()
            .map(|mx| {
                ExchangeCandidate::new(normalize_exchange(&mx.exchange().to_utf8()), mx.preference())
            })
            .collect())
    }
}

/// Strips the trailing root dot and lowercases an exchange name.
pub(crate) fn normalize_exchange(exchange: &str) -> String {
    exchange.trim_end_matches('.').to_ascii_lowercase()
}
