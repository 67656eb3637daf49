//! API Server Discovery
//!
//! Finds the API servers for an environment from a single DNS TXT record.
//!
//! ## Flow
//!
//! ```text
//! TXT lookup (bounded by timeout)
//!   → exactly one record?
//!   → base64 decode
//!   → JSON parse
//!   → Vec<ApiServer>
//! ```
//!
//! Each call is one attempt. Retries, caching and fallbacks belong to the
//! caller.

mod codec;
mod resolver;

pub use codec::{decode_record, encode_record};
pub use resolver::{HickoryTxtResolver, TxtResolver};

use hickory_resolver::error::ResolveError;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::DiscoveryConfig;
use crate::error::{DiscoveryError, LookupError};
use crate::types::ApiServer;

/// Look up `name` and decode the API servers published in its TXT record
///
/// The lookup is cancelled (its future dropped) once `timeout` elapses.
pub async fn discover_api_servers(
    resolver: &dyn TxtResolver,
    name: &str,
    timeout: Duration,
) -> Result<Vec<ApiServer>, DiscoveryError> {
    if name.trim().is_empty() {
        return Err(DiscoveryError::lookup(name, LookupError::EmptyName));
    }

    debug!("Looking up TXT records for {} (timeout {:?})", name, timeout);

    let records = match tokio::time::timeout(timeout, resolver.lookup_txt(name)).await {
        Ok(Ok(records)) => records,
        Ok(Err(e)) => {
            warn!("TXT lookup for {} failed: {}", name, e);
            return Err(DiscoveryError::lookup(name, LookupError::Resolve(e)));
        }
        Err(_) => {
            warn!("TXT lookup for {} timed out after {:?}", name, timeout);
            return Err(DiscoveryError::lookup(name, LookupError::Timeout(timeout)));
        }
    };

    let record = match records.as_slice() {
        [] => return Err(DiscoveryError::lookup(name, LookupError::NoRecords)),
        [record] => record,
        _ => {
            return Err(DiscoveryError::AmbiguousRecord {
                name: name.to_string(),
                count: records.len(),
            })
        }
    };

    let servers = decode_record(record)?;
    debug!("Discovered {} API servers at {}", servers.len(), name);

    Ok(servers)
}

/// Discovery bound to a resolver and a timeout
///
/// Cheap to clone; clones share the resolver and may run concurrently.
#[derive(Clone)]
pub struct ApiServerDiscovery {
    resolver: Arc<dyn TxtResolver>,
    timeout: Duration,
}

impl ApiServerDiscovery {
    pub fn new(resolver: Arc<dyn TxtResolver>, timeout: Duration) -> Self {
        Self { resolver, timeout }
    }

    /// Build a hickory-backed discovery from configuration
    pub fn from_config(config: &DiscoveryConfig) -> Result<Self, ResolveError> {
        let resolver = HickoryTxtResolver::from_config(config)?;
        Ok(Self::new(Arc::new(resolver), config.timeout()))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn discover(&self, name: &str) -> Result<Vec<ApiServer>, DiscoveryError> {
        discover_api_servers(self.resolver.as_ref(), name, self.timeout).await
    }
}
