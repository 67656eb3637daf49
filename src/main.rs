//! Skipctl API server discovery CLI
//!
//! Operator tool around the discovery library:
//!
//! - `discover` resolves a DNS name and prints the API servers it publishes
//! - `encode` turns a JSON server list into the TXT record value to publish
//! - `decode` shows what a TXT record value contains

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use skipctl_discovery::{
    decode_record, encode_record, ApiServer, ApiServerDiscovery, DiscoveryConfig,
};

/// Discover skipctl API servers published in DNS TXT records
#[derive(Parser, Debug)]
#[command(name = "skipctl-discovery")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "DNS TXT record based API server discovery", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "discovery.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn", env = "SKIPCTL_LOG")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Look up a DNS name and list the API servers in its TXT record
    Discover(DiscoverCmd),

    /// Encode a JSON server list into a TXT record value
    Encode(EncodeCmd),

    /// Decode a TXT record value
    Decode(DecodeCmd),
}

#[derive(Parser, Debug)]
struct DiscoverCmd {
    /// DNS name holding the TXT record (defaults to `dns_name` from the config file)
    name: Option<String>,

    /// Lookup timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Nameserver to query instead of the system resolver (repeatable)
    #[arg(long = "nameserver", value_name = "IP")]
    nameservers: Vec<IpAddr>,

    /// Port for --nameserver
    #[arg(long)]
    nameserver_port: Option<u16>,

    /// Print the servers as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct EncodeCmd {
    /// JSON file with the server list, `-` for stdin
    file: PathBuf,
}

#[derive(Parser, Debug)]
struct DecodeCmd {
    /// Base64 TXT record value
    value: String,

    /// Print the servers as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr, results to stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.clone().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Discover(cmd) => discover(&cli.config, cmd).await,
        Commands::Encode(cmd) => encode(cmd),
        Commands::Decode(cmd) => decode(cmd),
    }
}

async fn discover(config_path: &Path, cmd: DiscoverCmd) -> anyhow::Result<()> {
    let config = if config_path.exists() {
        DiscoveryConfig::load(config_path)
            .with_context(|| format!("failed to load config {}", config_path.display()))?
    } else {
        debug!("Config file {:?} not found, using defaults", config_path);
        DiscoveryConfig::default()
    };

    let mut config = config
        .with_dns_name(cmd.name)
        .with_timeout_ms(cmd.timeout_ms)
        .with_nameservers(cmd.nameservers);
    if let Some(port) = cmd.nameserver_port {
        config = config.with_nameserver_port(port);
    }

    config.validate()?;

    let name = config
        .dns_name
        .clone()
        .context("no DNS name given and no dns_name in config")?;

    let discovery = ApiServerDiscovery::from_config(&config)
        .context("failed to set up DNS resolver")?;

    info!("🔍 Discovering API servers at {} (timeout {:?})", name, discovery.timeout());

    let servers = match discovery.discover(&name).await {
        Ok(servers) => servers,
        Err(e) => {
            if e.is_timeout() {
                warn!("DNS lookup for {} timed out", name);
            }
            return Err(e.into());
        }
    };

    info!("✅ Found {} API servers", servers.len());
    print_servers(&servers, cmd.json)
}

fn encode(cmd: EncodeCmd) -> anyhow::Result<()> {
    let content = if cmd.file.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(&cmd.file)
            .with_context(|| format!("failed to read {}", cmd.file.display()))?
    };

    let servers: Vec<ApiServer> =
        serde_json::from_str(&content).context("server list must be a JSON array of {name, addr}")?;
    debug!("Encoding {} API servers", servers.len());

    println!("{}", encode_record(&servers)?);
    Ok(())
}

fn decode(cmd: DecodeCmd) -> anyhow::Result<()> {
    let servers = decode_record(&cmd.value)?;
    print_servers(&servers, cmd.json)
}

fn print_servers(servers: &[ApiServer], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(servers)?);
    } else {
        for server in servers {
            println!("{}", server);
        }
    }
    Ok(())
}
