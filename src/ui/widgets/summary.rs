// src/ui/widgets/summary.rs

use crate::app::{App, AppState};
use crate::core::models::Verdict;
use crate::ui::widgets::results::verdict_style;
use strum::IntoEnumIterator;
use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, Gauge, Paragraph},
};

/// Renders the summary widget: scan progress and a count per verdict.
///
/// Nothing is drawn inside the block until a scan has been started.
pub fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let summary_container = Block::default().borders(Borders::ALL).title("Summary");
    frame.render_widget(summary_container, area);

    let summary_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Progress label
            Constraint::Length(1), // Gauge
            Constraint::Length(1), // Spacer
            Constraint::Min(0),    // Verdict counts
        ])
        .split(area);

    if app.scan_total == 0 || matches!(app.state, AppState::Idle | AppState::LookingUp) {
        return;
    }

    let done = app.scan_batch.len();
    let label = Text::from(vec![
        Line::from("Progress".bold()),
        Line::from(format!("{done}/{} domains", app.scan_total)),
    ]);
    frame.render_widget(Paragraph::new(label).alignment(Alignment::Center), summary_chunks[0]);

    let gauge_color = if matches!(app.state, AppState::Finished) { Color::Green } else { Color::Cyan };
    let gauge = Gauge::default()
        .ratio(app.progress())
        .label("")
        .gauge_style(Style::default().fg(gauge_color).bg(Color::DarkGray));
    frame.render_widget(gauge, summary_chunks[1]);

    let lines: Vec<Line> = Verdict::iter()
        .map(|verdict| {
            Line::from(vec![
                Span::styled(format!("{:<11}", verdict.to_string()), verdict_style(verdict)),
                Span::raw(app.summary.count(verdict).to_string()),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), summary_chunks[3]);
}
