use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;
use rutpoint_api_types::DEFAULT_API_PREFIX;

/// Runtime configuration, from flags or environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "rutpoint-server", about = "Taxi rank query service")]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Path the rank routes are mounted under; empty mounts them at the root
    #[arg(long, env = "API_PREFIX", default_value = DEFAULT_API_PREFIX)]
    pub api_prefix: String,

    /// JSON array of ranks to serve instead of the built-in reference set
    #[arg(long, env = "RANKS_FILE")]
    pub ranks_file: Option<PathBuf>,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// `""` for the root, otherwise `/segment[/segment...]` without a trailing slash.
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
