//! TXT record payload codec
//!
//! Record value = base64 (standard alphabet, padded) of a UTF-8 JSON array:
//!
//! ```text
//! [{"name":"primary","addr":"10.0.0.1:6443"},{"name":"secondary","addr":"10.0.0.2:6443"}]
//! ```

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::DiscoveryError;
use crate::types::ApiServer;

/// Decode a single TXT record value into the server list it carries
///
/// Line breaks inside the value are skipped; any other whitespace is an
/// encoding error.
pub fn decode_record(value: &str) -> Result<Vec<ApiServer>, DiscoveryError> {
    let value: String = value.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();
    let bytes = STANDARD.decode(value)?;
    let servers: Vec<ApiServer> = serde_json::from_slice(&bytes)?;
    Ok(servers)
}

/// Produce the TXT record value for a server list
pub fn encode_record(servers: &[ApiServer]) -> Result<String, serde_json::Error> {
    let json = serde_json::to_vec(servers)?;
    Ok(STANDARD.encode(json))
}
