// src/core/models.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::net::IpAddr;
use std::time::Duration;
use strum::{Display, EnumIter};

// --- Scan Configuration ---

/// Default number of domains classified at the same time.
pub const DEFAULT_POOL_SIZE: usize = 10;
/// Default bound on a single name resolution.
pub const DEFAULT_RESOLVE_TIMEOUT: Duration = Duration::from_secs(2);
/// Default bound on a single HTTP probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Knobs for one bulk scan. Built fresh per invocation, never shared globally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    pub pool_size: usize,
    pub resolve_timeout: Duration,
    pub probe_timeout: Duration,
}

impl ScanConfig {
    /// Pool size actually used by the orchestrator; a pool of zero workers
    /// would never finish, so it is treated as one.
    pub fn effective_pool_size(&self) -> usize {
        self.pool_size.max(1)
    }

    /// Worst-case wall-clock time a single domain can take.
    pub fn per_domain_bound(&self) -> Duration {
        self.resolve_timeout + self.probe_timeout
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_POOL_SIZE,
            resolve_timeout: DEFAULT_RESOLVE_TIMEOUT,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}

// --- Reachability Models ---

/// The three-valued reachability classification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Verdict {
    Accessible,
    Blocked,
    Error,
}

/// Ordered addresses a domain resolved to.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct AddressSet(Vec<IpAddr>);

impl AddressSet {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IpAddr> {
        self.0.iter()
    }
}

impl From<Vec<IpAddr>> for AddressSet {
    fn from(addresses: Vec<IpAddr>) -> Self {
        Self(addresses)
    }
}

impl FromIterator<IpAddr> for AddressSet {
    fn from_iter<I: IntoIterator<Item = IpAddr>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Formats as `a, b, c`, the way addresses appear in a result's detail.
impl fmt::Display for AddressSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .iter()
            .map(|ip| ip.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&joined)
    }
}

/// What a single HTTP probe observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProbeOutcome {
    /// The server answered with 200.
    Success(u16),
    /// The server answered, but with anything other than 200.
    HttpError(u16),
    /// No HTTP exchange completed: refused, reset, timed out, etc.
    TransportFailure(String),
}

/// One classified domain. Created once by the classifier and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DomainResult {
    pub domain: String,
    pub verdict: Verdict,
    pub detail: String,
}

impl DomainResult {
    pub fn new(domain: impl Into<String>, verdict: Verdict, detail: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            verdict,
            detail: detail.into(),
        }
    }
}

/// Per-verdict counts over a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VerdictTally {
    pub accessible: usize,
    pub blocked: usize,
    pub error: usize,
}

impl VerdictTally {
    pub fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Accessible => self.accessible += 1,
            Verdict::Blocked => self.blocked += 1,
            Verdict::Error => self.error += 1,
        }
    }

    pub fn count(&self, verdict: Verdict) -> usize {
        match verdict {
            Verdict::Accessible => self.accessible,
            Verdict::Blocked => self.blocked,
            Verdict::Error => self.error,
        }
    }

    pub fn total(&self) -> usize {
        self.accessible + self.blocked + self.error
    }
}

/// All results of one scan, in the order they completed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanBatch {
    results: Vec<DomainResult>,
}

impl ScanBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: DomainResult) {
        self.results.push(result);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DomainResult> {
        self.results.iter()
    }

    pub fn tally(&self) -> VerdictTally {
        let mut tally = VerdictTally::default();
        for result in &self.results {
            tally.record(result.verdict);
        }
        tally
    }
}

impl IntoIterator for ScanBatch {
    type Item = DomainResult;
    type IntoIter = std::vec::IntoIter<DomainResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl<'a> IntoIterator for &'a ScanBatch {
    type Item = &'a DomainResult;
    type IntoIter = std::slice::Iter<'a, DomainResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

// --- Deep Lookup Models ---

/// Record types gathered by the single-domain lookup, in display order.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter,
)]
pub enum RecordKind {
    #[strum(serialize = "A")]
    #[serde(rename = "A")]
    A,
    #[strum(serialize = "CNAME")]
    #[serde(rename = "CNAME")]
    Cname,
    #[strum(serialize = "MX")]
    #[serde(rename = "MX")]
    Mx,
    #[strum(serialize = "NS")]
    #[serde(rename = "NS")]
    Ns,
    #[strum(serialize = "TXT")]
    #[serde(rename = "TXT")]
    Txt,
}

/// Textual entries per record type. A type that could not be fetched holds a
/// single explanatory entry such as "No record found".
pub type RecordSet = BTreeMap<RecordKind, Vec<String>>;

/// Everything the deep lookup learned about one domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainReport {
    pub domain: String,
    pub ip_address: IpAddr,
    /// Round-trip time in milliseconds as printed by `ping`, if any.
    pub ping_time: Option<String>,
    pub records: RecordSet,
    pub creation_date: Option<String>,
    pub expiration_date: Option<String>,
    pub checked_at: DateTime<Utc>,
}
