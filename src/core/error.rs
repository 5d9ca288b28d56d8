// src/core/error.rs

use serde::Serialize;
use thiserror::Error;

/// Why a domain could not be turned into a set of addresses.
///
/// The `Display` text doubles as the detail string shown to the user, so it
/// is worded for a report rather than for a developer.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
pub enum ResolutionFailure {
    /// Authoritative negative answer (NXDOMAIN).
    #[error("DNS resolution failed - Domain does not exist")]
    NameNotFound,
    /// The name exists but carries no A records.
    #[error("DNS resolution failed - No A records")]
    NoAddressRecord,
    #[error("DNS resolution timeout")]
    Timeout,
    /// Anything the resolver reported that is not one of the above.
    #[error("{0}")]
    Other(String),
}

impl ResolutionFailure {
    /// Failures that count as evidence of interference rather than a tool fault.
    pub fn is_blocking(&self) -> bool {
        !matches!(self, ResolutionFailure::Other(_))
    }
}

/// Errors surfaced by the single-domain deep lookup.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum LookupError {
    #[error("Invalid domain format: {0}")]
    InvalidDomain(String),

    #[error("Domain {0} does not exist")]
    DomainNotFound(String),

    #[error("Could not resolve domain {0}. Please check if the domain exists.")]
    Unresolvable(String),

    #[error("Error: {0}")]
    Internal(String),
}

/// Why a WHOIS query produced no response. Never fatal to a lookup; the
/// report just omits the registration dates.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WhoisError {
    #[error("Failed to initialize WHOIS client: {0}")]
    ServerList(String),

    #[error("Invalid domain for WHOIS: {0}")]
    InvalidTarget(String),

    #[error("WHOIS query failed: {0}")]
    Query(String),

    #[error("WHOIS query timed out")]
    Timeout,
}

/// Result alias for the deep-lookup path.
pub type LookupResult<T> = std::result::Result<T, LookupError>;
