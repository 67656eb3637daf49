//! Core types for API server discovery
//!
//! These types define the payload carried inside the discovery TXT record.

use serde::{Deserialize, Serialize};

/// A discovered API server
///
/// Descriptors are built by parsing a TXT record payload and are not
/// mutated afterwards. Two descriptors are the same server when both
/// fields match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApiServer {
    /// Logical server name (e.g. "primary")
    name: String,

    /// Network address, usually `host:port`
    #[serde(alias = "address")]
    addr: String,
}

impl ApiServer {
    /// Create a descriptor, used when building a record to publish
    pub fn new(name: impl Into<String>, addr: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            addr: addr.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }
}

impl std::fmt::Display for ApiServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\t{}", self.name, self.addr)
    }
}
