//! Discovery errors

use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use std::time::Duration;

/// Why the TXT lookup itself failed
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("TXT lookup timed out after {0:?}")]
    Timeout(Duration),

    #[error("no TXT records found")]
    NoRecords,

    #[error("DNS name must not be empty")]
    EmptyName,

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl LookupError {
    /// True for both our own deadline and the resolver's per-query timeout
    pub fn is_timeout(&self) -> bool {
        match self {
            LookupError::Timeout(_) => true,
            LookupError::Resolve(e) => matches!(e.kind(), ResolveErrorKind::Timeout),
            _ => false,
        }
    }
}

/// Errors returned by the discovery operation
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("failed to discover API servers at {name}")]
    Lookup {
        name: String,
        #[source]
        source: LookupError,
    },

    #[error("found {count} TXT records with the same name: {name}")]
    AmbiguousRecord { name: String, count: usize },

    #[error("failed base64 decoding TXT record")]
    Encoding(#[from] base64::DecodeError),

    #[error("failed unmarshalling TXT record")]
    Payload(#[from] serde_json::Error),
}

impl DiscoveryError {
    pub(crate) fn lookup(name: &str, source: LookupError) -> Self {
        DiscoveryError::Lookup {
            name: name.to_string(),
            source,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, DiscoveryError::Lookup { source, .. } if source.is_timeout())
    }
}
