// src/report.rs

//! Plain-text and JSON rendering of scan batches and lookup reports, used
//! when the program runs without the terminal UI.

use crate::core::models::{DomainReport, ScanBatch};

const SCAN_TITLE: &str = "Website Accessibility Report";

/// Renders a batch as an aligned `Domain | Status | Details` table in
/// completion order, followed by a tally line.
pub fn render_scan_table(batch: &ScanBatch) -> String {
    let headers = ["Domain", "Status", "Details"];
    let rows: Vec<[String; 3]> = batch
        .iter()
        .map(|r| [r.domain.clone(), r.verdict.to_string(), r.detail.clone()])
        .collect();

    let mut widths = headers.map(|h| h.len());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(SCAN_TITLE);
    out.push('\n');
    push_row(&mut out, &headers.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(rule.join("-+-").trim_end());
    out.push('\n');
    for row in &rows {
        push_row(&mut out, row, &widths);
    }

    let tally = batch.tally();
    out.push_str(&format!(
        "\n{} checked: {} accessible, {} blocked, {} errors\n",
        tally.total(),
        tally.accessible,
        tally.blocked,
        tally.error
    ));
    out
}

fn push_row(out: &mut String, cells: &[String; 3], widths: &[usize; 3]) {
    let line = format!(
        "{:<w0$} | {:<w1$} | {}",
        cells[0],
        cells[1],
        cells[2],
        w0 = widths[0],
        w1 = widths[1]
    );
    out.push_str(line.trim_end());
    out.push('\n');
}

pub fn render_scan_json(batch: &ScanBatch) -> serde_json::Result<String> {
    serde_json::to_string_pretty(batch)
}

/// Renders a lookup report as a `Property: Value` listing; multi-valued
/// records continue on indented lines.
pub fn render_lookup(report: &DomainReport) -> String {
    let mut rows: Vec<(String, Vec<String>)> = vec![
        ("IP Address".to_string(), vec![report.ip_address.to_string()]),
        (
            "Ping Time".to_string(),
            vec![match &report.ping_time {
                Some(ms) => format!("{ms} ms"),
                None => "N/A".to_string(),
            }],
        ),
    ];
    for (kind, entries) in &report.records {
        rows.push((format!("{kind} Records"), entries.clone()));
    }
    if let Some(created) = &report.creation_date {
        rows.push(("Creation Date".to_string(), vec![created.clone()]));
    }
    if let Some(expires) = &report.expiration_date {
        rows.push(("Expiration Date".to_string(), vec![expires.clone()]));
    }

    let key_width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    let mut out = format!("DNS Information for {}\n", report.domain);
    for (key, values) in rows {
        let mut values = values.into_iter();
        let first = values.next().unwrap_or_default();
        out.push_str(&format!("{key:<key_width$}  {first}\n"));
        for more in values {
            out.push_str(&format!("{:<key_width$}  {more}\n", ""));
        }
    }
    out
}

pub fn render_lookup_json(report: &DomainReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{DomainResult, RecordKind, RecordSet, Verdict};
    use chrono::Utc;
    use std::net::{IpAddr, Ipv4Addr};

    fn batch() -> ScanBatch {
        let mut batch = ScanBatch::new();
        batch.push(DomainResult::new(
            "wikipedia.org",
            Verdict::Accessible,
            "HTTP 200, IPs: 185.15.59.224",
        ));
        batch.push(DomainResult::new(
            "example-nxdomain.test",
            Verdict::Blocked,
            "DNS resolution failed - Domain does not exist",
        ));
        batch
    }

    #[test]
    fn scan_table_lists_rows_in_batch_order() {
        let text = render_scan_table(&batch());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Website Accessibility Report");
        assert!(lines[1].starts_with("Domain"));
        assert!(lines[3].starts_with("wikipedia.org"));
        assert!(lines[3].contains("| Accessible"));
        assert!(lines[4].starts_with("example-nxdomain.test | Blocked"));
        assert!(text.contains("2 checked: 1 accessible, 1 blocked, 0 errors"));
    }

    #[test]
    fn scan_table_columns_are_aligned() {
        let text = render_scan_table(&batch());
        let bars: Vec<usize> = text
            .lines()
            .skip(3)
            .take(2)
            .map(|line| line.find('|').unwrap())
            .collect();
        assert_eq!(bars[0], bars[1]);
    }

    #[test]
    fn scan_json_uses_verdict_names() {
        let json = render_scan_json(&batch()).unwrap();
        assert!(json.contains("\"verdict\": \"Accessible\""));
        assert!(json.contains("\"verdict\": \"Blocked\""));
    }

    #[test]
    fn lookup_listing_shows_records_and_missing_ping() {
        let mut records = RecordSet::new();
        records.insert(RecordKind::A, vec!["192.0.2.1".into(), "192.0.2.2".into()]);
        records.insert(RecordKind::Mx, vec!["No record found".into()]);
        let report = DomainReport {
            domain: "example.com".into(),
            ip_address: IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)),
            ping_time: None,
            records,
            creation_date: Some("1995-08-14T04:00:00Z".into()),
            expiration_date: None,
            checked_at: Utc::now(),
        };

        let text = render_lookup(&report);

        assert!(text.starts_with("DNS Information for example.com"));
        assert!(text.contains("Ping Time"));
        assert!(text.contains("N/A"));
        assert!(text.contains("A Records"));
        assert!(text.contains("192.0.2.2"));
        assert!(text.contains("MX Records"));
        assert!(text.contains("Creation Date"));
        assert!(!text.contains("Expiration Date"));
    }
}
