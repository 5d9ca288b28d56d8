// src/cli.rs

use std::time::Duration;

use clap::Parser;

use crate::core::models::{DEFAULT_POOL_SIZE, ScanConfig};
use crate::core::watchlist;

#[derive(Debug, Parser)]
#[command(name = "domain-reach")]
#[command(about = "Check which domains are reachable from this network, or inspect a single domain.")]
pub struct CommandLine {
    /// Domains to scan instead of the built-in watch list
    pub domains: Vec<String>,

    /// Print the scan as a plain listing instead of opening the terminal UI
    #[arg(long)]
    pub plain: bool,

    /// Print results as JSON (implies --plain)
    #[arg(long)]
    pub json: bool,

    /// Run the deep lookup for a single domain and print it
    #[arg(long, short = 'l', value_name = "DOMAIN")]
    pub lookup: Option<String>,

    /// Number of domains checked at the same time
    #[arg(long, default_value_t = DEFAULT_POOL_SIZE)]
    pub pool_size: usize,

    /// Upper bound for one DNS resolution, in milliseconds
    #[arg(long, default_value_t = 2000)]
    pub resolve_timeout_ms: u64,

    /// Upper bound for one HTTP probe, in milliseconds
    #[arg(long, default_value_t = 3000)]
    pub probe_timeout_ms: u64,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            pool_size: self.pool_size,
            resolve_timeout: Duration::from_millis(self.resolve_timeout_ms),
            probe_timeout: Duration::from_millis(self.probe_timeout_ms),
        }
    }

    /// The user's domains if any were given, otherwise the default watch list.
    pub fn domains(&self) -> Vec<String> {
        if self.domains.is_empty() {
            watchlist::default_domains()
        } else {
            self.domains.clone()
        }
    }

    pub fn non_interactive(&self) -> bool {
        self.plain || self.json
    }
}
