// src/core/lookup/whois.rs

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};
use whois_rust::{WhoIs, WhoIsLookupOptions};

use crate::core::error::WhoisError;

/// Embedded WHOIS server mapping (TLD -> server).
const WHOIS_SERVERS: &str = include_str!("whois_servers.json");

const WHOIS_TIMEOUT: Duration = Duration::from_secs(8);

static RE_CREATED: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)Creation Date:\s*(.+)",
        r"(?i)Created Date:\s*(.+)",
        r"(?i)Created:\s*(.+)",
        r"(?i)Registration Time:\s*(.+)",
        r"(?i)Registration Date:\s*(.+)",
    ])
});

static RE_EXPIRES: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)Registry Expiry Date:\s*(.+)",
        r"(?i)Expir(?:y|ation) Date:\s*(.+)",
        r"(?i)Expiration Time:\s*(.+)",
        r"(?i)paid-till:\s*(.+)",
    ])
});

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().filter_map(|p| Regex::new(p).ok()).collect()
}

/// Registration dates as the registry printed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationDates {
    pub creation: Option<String>,
    pub expiration: Option<String>,
}

/// Queries WHOIS for `domain`. Any failure yields empty dates; the lookup
/// report simply omits them.
pub async fn registration_dates(domain: &str) -> RegistrationDates {
    match query(domain).await {
        Ok(raw) => parse_registration_dates(&raw),
        Err(e) => {
            warn!(domain, error = %e, "WHOIS lookup failed.");
            RegistrationDates::default()
        }
    }
}

async fn query(domain: &str) -> Result<String, WhoisError> {
    let whois = WhoIs::from_string(WHOIS_SERVERS).map_err(|e| WhoisError::ServerList(e.to_string()))?;
    let options = WhoIsLookupOptions::from_string(domain).map_err(|e| WhoisError::InvalidTarget(e.to_string()))?;

    debug!(domain, "Sending WHOIS query.");
    match tokio::time::timeout(WHOIS_TIMEOUT, whois.lookup_async(options)).await {
        Ok(Ok(raw)) => Ok(raw),
        Ok(Err(e)) => Err(WhoisError::Query(e.to_string())),
        Err(_) => Err(WhoisError::Timeout),
    }
}

/// Pulls the first creation and expiration dates out of a raw WHOIS response.
pub fn parse_registration_dates(raw: &str) -> RegistrationDates {
    RegistrationDates {
        creation: first_capture(raw, &RE_CREATED),
        expiration: first_capture(raw, &RE_EXPIRES),
    }
}

fn first_capture(text: &str, patterns: &[Regex]) -> Option<String> {
    patterns.iter().find_map(|re| {
        re.captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|value| !value.is_empty())
    })
}
