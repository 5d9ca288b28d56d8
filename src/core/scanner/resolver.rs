// src/core/scanner/resolver.rs

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::TokioAsyncResolver;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::error::ProtoErrorKind;
use hickory_resolver::proto::op::ResponseCode;
use tracing::{debug, warn};

use crate::core::error::ResolutionFailure;
use crate::core::models::AddressSet;

/// Turns a domain into the addresses it points at.
///
/// Implementations only look up A records. `timeout` bounds the whole
/// lookup; callers may still enforce it again from the outside.
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(&self, domain: &str, timeout: Duration) -> Result<AddressSet, ResolutionFailure>;
}

/// Resolver adapter backed by hickory, configured from the host's DNS settings.
pub struct HickoryResolver {
    resolver: TokioAsyncResolver,
}

impl HickoryResolver {
    /// Builds a resolver that makes a single attempt per query, each bounded
    /// by `timeout`.
    pub fn new(timeout: Duration) -> Self {
        let (config, mut opts) = system_config();
        opts.timeout = timeout;
        opts.attempts = 1;
        Self {
            resolver: TokioAsyncResolver::tokio(config, opts),
        }
    }
}

#[async_trait]
impl Resolver for HickoryResolver {
    async fn resolve(&self, domain: &str, timeout: Duration) -> Result<AddressSet, ResolutionFailure> {
        debug!(domain, "Looking up A records.");
        let lookup = match tokio::time::timeout(timeout, self.resolver.ipv4_lookup(domain)).await {
            Ok(Ok(lookup)) => lookup,
            Ok(Err(e)) => {
                let failure = classify_resolve_error(&e);
                debug!(domain, error = %e, failure = ?failure, "A lookup failed.");
                return Err(failure);
            }
            Err(_) => {
                debug!(domain, "A lookup exceeded its deadline.");
                return Err(ResolutionFailure::Timeout);
            }
        };

        let addresses: AddressSet = lookup.iter().map(|a| IpAddr::V4(a.0)).collect();
        if addresses.is_empty() {
            return Err(ResolutionFailure::NoAddressRecord);
        }
        debug!(domain, count = addresses.len(), "A lookup succeeded.");
        Ok(addresses)
    }
}

/// Maps hickory's error taxonomy onto the four failure kinds the classifier understands.
pub(crate) fn classify_resolve_error(error: &ResolveError) -> ResolutionFailure {
    match error.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. } if *response_code == ResponseCode::NXDomain => {
            ResolutionFailure::NameNotFound
        }
        ResolveErrorKind::NoRecordsFound { .. } => ResolutionFailure::NoAddressRecord,
        ResolveErrorKind::Timeout => ResolutionFailure::Timeout,
        ResolveErrorKind::Proto(proto) if matches!(proto.kind(), ProtoErrorKind::Timeout) => {
            ResolutionFailure::Timeout
        }
        _ => ResolutionFailure::Other(error.to_string()),
    }
}

/// Reads the system resolver configuration, falling back to hickory's defaults.
pub(crate) fn system_config() -> (ResolverConfig, ResolverOpts) {
    #[cfg(any(unix, target_os = "windows"))]
    {
        match hickory_resolver::system_conf::read_system_conf() {
            Ok(conf) => return conf,
            Err(e) => {
                warn!(error = %e, "Failed to load system DNS configuration, falling back to defaults.");
            }
        }
    }

    (ResolverConfig::default(), ResolverOpts::default())
}
