// src/core/scanner/classifier.rs

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error};

use super::prober::Prober;
use super::resolver::Resolver;
use crate::core::error::ResolutionFailure;
use crate::core::models::{AddressSet, DomainResult, ProbeOutcome, ScanConfig, Verdict};

/// Composes a resolver and a prober into one verdict per domain.
///
/// Resolution always runs first and a failed resolution is terminal: an
/// unresolved name is never probed. Both steps are bounded here, on top of
/// whatever the adapters do, so a single classification never takes longer
/// than `resolve_timeout + probe_timeout`.
pub struct DomainClassifier<R, P> {
    resolver: R,
    prober: P,
    resolve_timeout: Duration,
    probe_timeout: Duration,
}

impl<R: Resolver, P: Prober> DomainClassifier<R, P> {
    pub fn new(resolver: R, prober: P, resolve_timeout: Duration, probe_timeout: Duration) -> Self {
        Self {
            resolver,
            prober,
            resolve_timeout,
            probe_timeout,
        }
    }

    pub fn from_config(resolver: R, prober: P, config: &ScanConfig) -> Self {
        Self::new(resolver, prober, config.resolve_timeout, config.probe_timeout)
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn prober(&self) -> &P {
        &self.prober
    }

    /// Classifies one domain. Every path ends in a `DomainResult`.
    pub async fn classify(&self, domain: &str) -> DomainResult {
        debug!(domain, "Classifying domain.");

        let resolved = tokio::time::timeout(
            self.resolve_timeout,
            self.resolver.resolve(domain, self.resolve_timeout),
        )
        .await
        .unwrap_or(Err(ResolutionFailure::Timeout));

        let addresses = match resolved {
            Ok(addresses) if !addresses.is_empty() => addresses,
            Ok(_) => return result_for_resolution_failure(domain, ResolutionFailure::NoAddressRecord),
            Err(failure) => return result_for_resolution_failure(domain, failure),
        };

        let outcome = tokio::time::timeout(
            self.probe_timeout,
            self.prober.probe(domain, &addresses, self.probe_timeout),
        )
        .await
        .unwrap_or_else(|_| ProbeOutcome::TransportFailure("timed out".to_string()));

        result_for_probe_outcome(domain, &addresses, outcome)
    }
}

impl<R, P> DomainClassifier<R, P>
where
    R: Resolver + 'static,
    P: Prober + 'static,
{
    /// Classifies `domain` in its own task so that a panic anywhere inside the
    /// adapters is contained and reported as an `Error` result.
    pub async fn classify_guarded(self: Arc<Self>, domain: String) -> DomainResult {
        let task_domain = domain.clone();
        tokio::spawn(async move { self.classify(&task_domain).await })
            .await
            .unwrap_or_else(|e| {
                error!(domain = %domain, error = %e, "Classification task failed.");
                DomainResult::new(domain, Verdict::Error, format!("Classification task failed: {e}"))
            })
    }
}

/// `NameNotFound`, `NoAddressRecord` and `Timeout` are blocking evidence;
/// `Other` is a tool error.
pub fn result_for_resolution_failure(domain: &str, failure: ResolutionFailure) -> DomainResult {
    let verdict = if failure.is_blocking() {
        Verdict::Blocked
    } else {
        Verdict::Error
    };
    DomainResult::new(domain, verdict, failure.to_string())
}

/// Maps a completed probe onto a verdict, always mentioning the resolved addresses.
pub fn result_for_probe_outcome(domain: &str, addresses: &AddressSet, outcome: ProbeOutcome) -> DomainResult {
    match outcome {
        ProbeOutcome::Success(status) => DomainResult::new(
            domain,
            Verdict::Accessible,
            format!("HTTP {status}, IPs: {addresses}"),
        ),
        ProbeOutcome::HttpError(status) => DomainResult::new(
            domain,
            Verdict::Blocked,
            format!("HTTP {status}, IPs: {addresses}"),
        ),
        ProbeOutcome::TransportFailure(reason) => DomainResult::new(
            domain,
            Verdict::Blocked,
            format!("Connection failed ({reason}), IPs: {addresses}"),
        ),
    }
}
