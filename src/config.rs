//! Discovery Configuration
//!
//! Where to look and how long to wait. Loaded from a TOML file and
//! overridden from the command line.

use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::Path;
use std::time::Duration;

/// Default bound on a single TXT lookup (milliseconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Default DNS port for explicitly configured nameservers
pub const DEFAULT_NAMESERVER_PORT: u16 = 53;

/// Main configuration for API server discovery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// DNS name holding the TXT record (e.g. "apiservers.example.com")
    pub dns_name: Option<String>,

    /// Bound on the whole lookup (milliseconds)
    pub timeout_ms: u64,

    /// Nameservers to query. Empty uses the system resolver configuration
    pub nameservers: Vec<IpAddr>,

    /// Port used with `nameservers`
    pub nameserver_port: u16,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            dns_name: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            nameservers: vec![],
            nameserver_port: DEFAULT_NAMESERVER_PORT,
        }
    }
}

impl DiscoveryConfig {
    /// Load configuration from TOML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    // Builder-style methods for CLI overrides

    pub fn with_dns_name(mut self, name: Option<String>) -> Self {
        if name.is_some() {
            self.dns_name = name;
        }
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        if let Some(ms) = timeout_ms {
            self.timeout_ms = ms;
        }
        self
    }

    pub fn with_nameservers(mut self, nameservers: Vec<IpAddr>) -> Self {
        if !nameservers.is_empty() {
            self.nameservers = nameservers;
        }
        self
    }

    pub fn with_nameserver_port(mut self, port: u16) -> Self {
        self.nameserver_port = port;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.timeout_ms == 0 {
            anyhow::bail!("timeout_ms must be greater than zero");
        }

        if let Some(name) = &self.dns_name {
            if name.trim().is_empty() {
                anyhow::bail!("dns_name must not be empty when set");
            }
        }

        if self.nameserver_port == 0 {
            anyhow::bail!("nameserver_port must not be zero");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_default_config() {
        let config = DiscoveryConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.nameserver_port, 53);
        assert!(config.nameservers.is_empty());
        assert!(config.dns_name.is_none());
    }

    #[test]
    fn test_config_validation() {
        let mut config = DiscoveryConfig::default();
        assert!(config.validate().is_ok());

        config.timeout_ms = 0;
        assert!(config.validate().is_err());

        let config = DiscoveryConfig::default().with_dns_name(Some(" ".to_string()));
        assert!(config.validate().is_err());

        let config = DiscoveryConfig::default().with_nameserver_port(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builder_methods() {
        let resolver = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 53));
        let config = DiscoveryConfig::default()
            .with_dns_name(Some("apiservers.example.com".to_string()))
            .with_timeout_ms(Some(750))
            .with_nameservers(vec![resolver])
            .with_nameserver_port(5353);

        assert_eq!(config.dns_name.as_deref(), Some("apiservers.example.com"));
        assert_eq!(config.timeout(), Duration::from_millis(750));
        assert_eq!(config.nameservers, vec![resolver]);
        assert_eq!(config.nameserver_port, 5353);
    }

    #[test]
    fn test_absent_overrides_keep_file_values() {
        let config = DiscoveryConfig::default()
            .with_dns_name(Some("from-file.example.com".to_string()))
            .with_timeout_ms(Some(1200))
            .with_dns_name(None)
            .with_timeout_ms(None)
            .with_nameservers(vec![]);

        assert_eq!(config.dns_name.as_deref(), Some("from-file.example.com"));
        assert_eq!(config.timeout_ms, 1200);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("discovery.toml");

        let config = DiscoveryConfig::default()
            .with_dns_name(Some("apiservers.example.com".to_string()))
            .with_nameservers(vec![IpAddr::V4(Ipv4Addr::new(1, 1, 1, 1))]);
        config.save(&path).unwrap();

        let loaded = DiscoveryConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("discovery.toml");
        std::fs::write(&path, "dns_name = \"apiservers.example.com\"\n").unwrap();

        let loaded = DiscoveryConfig::load(&path).unwrap();
        assert_eq!(loaded.dns_name.as_deref(), Some("apiservers.example.com"));
        assert_eq!(loaded.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(loaded.nameserver_port, DEFAULT_NAMESERVER_PORT);
    }
}
