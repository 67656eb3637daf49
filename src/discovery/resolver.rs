//! TXT Resolver
//!
//! The discovery operation only needs "give me the TXT records for this
//! name". That capability is a trait so callers can inject their own
//! resolver and tests can hand back canned records without touching the
//! network.

use async_trait::async_trait;
use hickory_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::op::ResponseCode;
use hickory_resolver::TokioAsyncResolver;
use std::net::IpAddr;
use std::time::Duration;
use tracing::debug;

use crate::config::DiscoveryConfig;

/// DNS TXT lookup capability
///
/// Returns one string per TXT record. An empty vector means the name
/// exists but carries no TXT records; a name that does not exist is an
/// error.
#[async_trait]
pub trait TxtResolver: Send + Sync {
    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, ResolveError>;
}

/// Production resolver backed by hickory
pub struct HickoryTxtResolver {
    inner: TokioAsyncResolver,
}

impl HickoryTxtResolver {
    /// Use the host's resolver configuration (`/etc/resolv.conf` on unix)
    pub fn from_system_conf(timeout: Duration) -> Result<Self, ResolveError> {
        let (config, opts) = hickory_resolver::system_conf::read_system_conf()?;
        Ok(Self::build(config, opts, timeout))
    }

    /// Query the given nameservers over plain UDP/TCP
    pub fn with_nameservers(nameservers: &[IpAddr], port: u16, timeout: Duration) -> Self {
        let group = NameServerConfigGroup::from_ips_clear(nameservers, port, true);
        let config = ResolverConfig::from_parts(None, vec![], group);
        Self::build(config, ResolverOpts::default(), timeout)
    }

    /// Pick nameservers from configuration, falling back to the system ones
    pub fn from_config(config: &DiscoveryConfig) -> Result<Self, ResolveError> {
        if config.nameservers.is_empty() {
            Self::from_system_conf(config.timeout())
        } else {
            Ok(Self::with_nameservers(
                &config.nameservers,
                config.nameserver_port,
                config.timeout(),
            ))
        }
    }

    fn build(config: ResolverConfig, mut opts: ResolverOpts, timeout: Duration) -> Self {
        // One attempt, no cache: every call is a fresh lookup
        opts.attempts = 1;
        opts.timeout = timeout;
        opts.cache_size = 0;
        opts.edns0 = true;

        Self {
            inner: TokioAsyncResolver::tokio(config, opts),
        }
    }
}

#[async_trait]
impl TxtResolver for HickoryTxtResolver {
    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, ResolveError> {
        match self.inner.txt_lookup(name).await {
            Ok(lookup) => Ok(lookup
                .iter()
                .map(|txt| join_character_strings(txt.txt_data()))
                .collect()),
            Err(e) if is_no_data(&e) => {
                debug!("No TXT records for {}: {}", name, e);
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }
}

/// The name exists but has no TXT records (NOERROR with an empty answer).
/// NXDOMAIN stays an error so its cause reaches the caller.
fn is_no_data(err: &ResolveError) -> bool {
    matches!(
        err.kind(),
        ResolveErrorKind::NoRecordsFound { response_code, .. } if *response_code == ResponseCode::NoError
    )
}

/// A TXT record longer than 255 bytes arrives as several character
/// strings; they form one value.
fn join_character_strings(chunks: &[Box<[u8]>]) -> String {
    chunks
        .iter()
        .map(|chunk| String::from_utf8_lossy(chunk))
        .collect()
}
