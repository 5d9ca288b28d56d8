// src/core/mod.rs

// The `core` module holds everything that talks to the network or decides
// what a probe means. Nothing in here knows about the terminal.

/// Data structures shared across the crate: verdicts, per-domain results,
/// scan batches, configuration and the deep-lookup report.
pub mod models;

/// Typed failures for name resolution and the single-domain lookup.
pub mod error;

/// The concurrent reachability classifier: resolver adapter, HTTP prober,
/// per-domain classifier and the worker-pool orchestrator.
pub mod scanner;

/// Single-domain deep diagnostic lookup (DNS records, WHOIS dates, ping).
pub mod lookup;

/// The default list of domains checked by a bulk scan.
pub mod watchlist;
