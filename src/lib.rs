//! Skipctl API Server Discovery
//!
//! Finds the API servers of an environment through DNS. The servers are
//! published as one TXT record whose value is the base64 encoding of a JSON
//! array:
//!
//! ```text
//! apiservers.example.com. TXT "W3sibmFtZSI6InByaW1hcnkiLCJhZGRyIjoiMTAuMC4wLjE6NjQ0MyJ9XQ=="
//!                              └─ [{"name":"primary","addr":"10.0.0.1:6443"}]
//! ```
//!
//! ## Usage
//!
//! ```no_run
//! use skipctl_discovery::{ApiServerDiscovery, DiscoveryConfig};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = DiscoveryConfig::default();
//! let discovery = ApiServerDiscovery::from_config(&config)?;
//! for server in discovery.discover("apiservers.example.com").await? {
//!     println!("{} -> {}", server.name(), server.addr());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The resolver is a [`TxtResolver`] trait object, so tests and embedders
//! can swap in their own.

pub mod config;
pub mod discovery;
pub mod error;
pub mod types;

pub use config::DiscoveryConfig;
pub use discovery::{
    decode_record, discover_api_servers, encode_record, ApiServerDiscovery, HickoryTxtResolver,
    TxtResolver,
};
pub use error::{DiscoveryError, LookupError};
pub use types::ApiServer;
