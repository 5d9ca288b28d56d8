// src/core/lookup/mod.rs

// Single-domain deep diagnostic lookup. Unlike the bulk scanner this path
// is sequential glue: validate, resolve, then gather records, WHOIS dates
// and latency side by side.
pub mod ping;
pub mod records;
pub mod validation;
pub mod whois;

use std::net::IpAddr;
use std::time::Duration;

use chrono::Utc;
use tracing::{info, warn};

use crate::core::error::{LookupError, LookupResult};
use crate::core::models::DomainReport;
use self::validation::validate_domain;

const ADDRESS_TIMEOUT: Duration = Duration::from_secs(5);

/// Runs the full deep lookup for one domain.
///
/// The domain is normalised (trimmed, lowercased) and validated first. If the
/// system resolver cannot produce an address the lookup stops there; if any
/// record query reports NXDOMAIN it stops with `DomainNotFound`. WHOIS and
/// ping failures are never fatal.
///
/// # Arguments
/// * `domain` - The domain name typed by the user.
///
/// # Returns
/// A `DomainReport`, or the `LookupError` that ended the lookup.
pub async fn run_domain_lookup(domain: &str) -> LookupResult<DomainReport> {
    let domain = domain.trim().to_lowercase();
    if !validate_domain(&domain) {
        return Err(LookupError::InvalidDomain(domain));
    }

    info!(domain = %domain, "Starting domain lookup.");
    let ip_address = primary_address(&domain).await?;

    let (records, dates, ping_time) = tokio::join!(
        records::fetch_records(&domain),
        whois::registration_dates(&domain),
        ping::ping_time(&domain)
    );
    let records = records?;

    info!(domain = %domain, ip = %ip_address, "Domain lookup finished.");
    Ok(DomainReport {
        domain,
        ip_address,
        ping_time,
        records,
        creation_date: dates.creation,
        expiration_date: dates.expiration,
        checked_at: Utc::now(),
    })
}

/// Resolves the address the operating system would connect to, preferring IPv4.
async fn primary_address(domain: &str) -> LookupResult<IpAddr> {
    let lookup = tokio::time::timeout(ADDRESS_TIMEOUT, tokio::net::lookup_host((domain, 0))).await;
    let addresses: Vec<IpAddr> = match lookup {
        Ok(Ok(addrs)) => addrs.map(|sa| sa.ip()).collect(),
        Ok(Err(e)) => {
            warn!(domain, error = %e, "System resolver could not resolve domain.");
            return Err(LookupError::Unresolvable(domain.to_string()));
        }
        Err(_) => {
            warn!(domain, "System resolver timed out.");
            return Err(LookupError::Unresolvable(domain.to_string()));
        }
    };

    addresses
        .iter()
        .find(|ip| ip.is_ipv4())
        .or_else(|| addresses.first())
        .copied()
        .ok_or_else(|| LookupError::Unresolvable(domain.to_string()))
}
