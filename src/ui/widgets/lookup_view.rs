// src/ui/widgets/lookup_view.rs
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use crate::app::{App, ReportView};
use crate::core::models::DomainReport;

/// Renders the single-domain lookup report as a property/value listing.
pub fn render_lookup_view(frame: &mut Frame, app: &App, area: Rect) {
    let ReportView::Lookup(report) = &app.view else {
        return;
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("DNS Information for {}", report.domain));

    let paragraph = Paragraph::new(build_lookup_text(report))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.scroll_offset as u16, 0));
    frame.render_widget(paragraph, area);
}

fn build_lookup_text(report: &DomainReport) -> Text<'static> {
    let key_style = Style::default().fg(Color::Cyan).bold();
    let mut lines = Vec::new();

    let ping = match &report.ping_time {
        Some(ms) => format!("{ms} ms"),
        None => "N/A".to_string(),
    };
    lines.push(property_line("IP Address", report.ip_address.to_string(), key_style));
    lines.push(property_line("Ping Time", ping, key_style));
    lines.push(Line::from(""));

    for (kind, entries) in &report.records {
        lines.push(Line::from(Span::styled(format!("{kind} Records"), key_style)));
        for entry in entries {
            lines.push(Line::from(format!("  {entry}")));
        }
    }

    if report.creation_date.is_some() || report.expiration_date.is_some() {
        lines.push(Line::from(""));
    }
    if let Some(created) = &report.creation_date {
        lines.push(property_line("Creation Date", created.clone(), key_style));
    }
    if let Some(expires) = &report.expiration_date {
        lines.push(property_line("Expiration Date", expires.clone(), key_style));
    }

    Text::from(lines)
}

fn property_line(key: &'static str, value: String, key_style: Style) -> Line<'static> {
    Line::from(vec![Span::styled(format!("{key}: "), key_style), Span::raw(value)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::lookup_line_count;
    use crate::core::models::{RecordKind, RecordSet};
    use chrono::Utc;
    use std::net::{IpAddr, Ipv4Addr};

    #[test]
    fn lookup_text_lists_every_record_kind() {
        let mut records = RecordSet::new();
        records.insert(RecordKind::A, vec!["192.0.2.1".into()]);
        records.insert(RecordKind::Txt, vec!["No record found".into()]);
        let report = DomainReport {
            domain: "example.com".into(),
            ip_address: IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)),
            ping_time: Some("12.3".into()),
            records,
            creation_date: None,
            expiration_date: None,
            checked_at: Utc::now(),
        };

        let rendered: Vec<String> = build_lookup_text(&report)
            .lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();

        assert_eq!(rendered[0], "IP Address: 192.0.2.1");
        assert_eq!(rendered[1], "Ping Time: 12.3 ms");
        assert!(rendered.contains(&"TXT Records".to_string()));
        assert!(rendered.contains(&"  No record found".to_string()));
    }

    #[test]
    fn scroll_length_matches_rendered_lines() {
        let mut records = RecordSet::new();
        records.insert(RecordKind::Mx, vec!["10 mx1.example.com.".into(), "20 mx2.example.com.".into()]);
        records.insert(RecordKind::Ns, vec!["a.iana-servers.net.".into()]);
        let mut report = DomainReport {
            domain: "example.com".into(),
            ip_address: IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)),
            ping_time: None,
            records,
            creation_date: None,
            expiration_date: None,
            checked_at: Utc::now(),
        };
        assert_eq!(build_lookup_text(&report).lines.len(), lookup_line_count(&report));

        report.creation_date = Some("1995-08-14".into());
        report.expiration_date = Some("2030-08-13".into());
        assert_eq!(build_lookup_text(&report).lines.len(), lookup_line_count(&report));
    }
}
