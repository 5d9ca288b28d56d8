// src/core/scanner/mod.rs

// Public interface of the reachability scanner. The pieces compose leaves
// first: resolver -> prober -> classifier -> orchestrator.
pub mod classifier;
pub mod orchestrator;
pub mod prober;
pub mod resolver;

#[cfg(test)]
pub(crate) mod testing;

use tracing::debug;

use crate::core::models::{ScanBatch, ScanConfig};
use self::classifier::DomainClassifier;
use self::orchestrator::ScanOrchestrator;
use self::prober::HttpProber;
use self::resolver::HickoryResolver;

/// Orchestrator wired to the real network adapters.
pub type NetworkOrchestrator = ScanOrchestrator<HickoryResolver, HttpProber>;

/// Builds a fresh orchestrator for one scan from explicit configuration.
///
/// Nothing is cached between scans: every invocation gets its own resolver,
/// HTTP client and worker pool.
pub fn network_orchestrator(config: &ScanConfig) -> Result<NetworkOrchestrator, reqwest::Error> {
    debug!(
        pool_size = config.effective_pool_size(),
        per_domain_bound = ?config.per_domain_bound(),
        "Building network orchestrator."
    );
    let resolver = HickoryResolver::new(config.resolve_timeout);
    let prober = HttpProber::new(config.probe_timeout)?;
    let classifier = DomainClassifier::from_config(resolver, prober, config);
    Ok(ScanOrchestrator::new(classifier, config.effective_pool_size()))
}

/// Classifies `domains` against the live network and waits for the full batch.
///
/// # Arguments
///
/// * `domains` - The domains to check; duplicates are checked once.
/// * `config` - Pool size and per-step timeouts.
///
/// # Returns
///
/// A `ScanBatch` in completion order, or the error raised while building the
/// HTTP client.
pub async fn run_scan(domains: Vec<String>, config: &ScanConfig) -> Result<ScanBatch, reqwest::Error> {
    let orchestrator = network_orchestrator(config)?;
    Ok(orchestrator.scan(domains).await)
}
