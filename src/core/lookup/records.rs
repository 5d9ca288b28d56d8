// src/core/lookup/records.rs

use std::time::Duration;

use hickory_resolver::TokioAsyncResolver;
use hickory_resolver::proto::rr::{RData, RecordType};
use tracing::{debug, info, warn};

use crate::core::error::{LookupError, LookupResult, ResolutionFailure};
use crate::core::models::{RecordKind, RecordSet};
use crate::core::scanner::resolver::{classify_resolve_error, system_config};

/// Per-record-type deadline for the deep lookup.
pub const RECORD_TIMEOUT: Duration = Duration::from_secs(5);

/// Outcome of fetching one record type.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RecordFetch {
    Entries(Vec<String>),
    /// NXDOMAIN: the whole lookup must stop.
    NameNotFound,
}

fn record_type(kind: RecordKind) -> RecordType {
    match kind {
        RecordKind::A => RecordType::A,
        RecordKind::Cname => RecordType::CNAME,
        RecordKind::Mx => RecordType::MX,
        RecordKind::Ns => RecordType::NS,
        RecordKind::Txt => RecordType::TXT,
    }
}

/// The single entry shown for a record type that could not be fetched.
/// `None` means the domain does not exist at all.
fn failure_entry(failure: ResolutionFailure) -> Option<String> {
    match failure {
        ResolutionFailure::NameNotFound => None,
        ResolutionFailure::NoAddressRecord => Some("No record found".to_string()),
        ResolutionFailure::Timeout => Some("Timeout while fetching record".to_string()),
        ResolutionFailure::Other(message) => Some(format!("Error: {message}")),
    }
}

fn rdata_text(rdata: &RData) -> String {
    match rdata {
        RData::TXT(txt) => txt
            .iter()
            .map(|chunk| String::from_utf8_lossy(chunk).to_string())
            .collect::<String>(),
        other => other.to_string(),
    }
}

async fn fetch(resolver: &TokioAsyncResolver, domain: &str, kind: RecordKind) -> RecordFetch {
    let rtype = record_type(kind);
    debug!(domain, record = %kind, "Fetching records.");

    let failure = match tokio::time::timeout(RECORD_TIMEOUT, resolver.lookup(domain, rtype)).await {
        Ok(Ok(lookup)) => {
            let entries: Vec<String> = lookup
                .iter()
                .filter(|rdata| rdata.record_type() == rtype)
                .map(rdata_text)
                .collect();
            if !entries.is_empty() {
                return RecordFetch::Entries(entries);
            }
            ResolutionFailure::NoAddressRecord
        }
        Ok(Err(e)) => {
            warn!(domain, record = %kind, error = %e, "Record lookup failed.");
            classify_resolve_error(&e)
        }
        Err(_) => ResolutionFailure::Timeout,
    };

    match failure_entry(failure) {
        Some(entry) => RecordFetch::Entries(vec![entry]),
        None => RecordFetch::NameNotFound,
    }
}

/// Fetches A, CNAME, MX, NS and TXT records concurrently.
///
/// Returns `DomainNotFound` as soon as any record type reports NXDOMAIN;
/// every other failure is folded into that type's entries.
pub async fn fetch_records(domain: &str) -> LookupResult<RecordSet> {
    let (config, mut opts) = system_config();
    opts.timeout = RECORD_TIMEOUT;
    let resolver = TokioAsyncResolver::tokio(config, opts);

    let (a, cname, mx, ns, txt) = tokio::join!(
        fetch(&resolver, domain, RecordKind::A),
        fetch(&resolver, domain, RecordKind::Cname),
        fetch(&resolver, domain, RecordKind::Mx),
        fetch(&resolver, domain, RecordKind::Ns),
        fetch(&resolver, domain, RecordKind::Txt)
    );

    let fetched = [
        (RecordKind::A, a),
        (RecordKind::Cname, cname),
        (RecordKind::Mx, mx),
        (RecordKind::Ns, ns),
        (RecordKind::Txt, txt),
    ];
    let records = collect_records(domain, fetched)?;
    info!(domain, "Record lookup finished.");
    Ok(records)
}

fn collect_records(
    domain: &str,
    fetched: impl IntoIterator<Item = (RecordKind, RecordFetch)>,
) -> LookupResult<RecordSet> {
    let mut records = RecordSet::new();
    for (kind, fetch) in fetched {
        match fetch {
            RecordFetch::Entries(entries) => {
                records.insert(kind, entries);
            }
            RecordFetch::NameNotFound => return Err(LookupError::DomainNotFound(domain.to_string())),
        }
    }
    Ok(records)
}
