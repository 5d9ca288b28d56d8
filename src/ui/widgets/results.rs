// src/ui/widgets/results.rs
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Scrollbar, ScrollbarOrientation, Table, Wrap},
};
use crate::app::{App, AppState, ReportView};
use crate::core::models::Verdict;

/// Renders the main content area based on the application state.
pub fn render_results(frame: &mut Frame, app: &mut App, area: Rect) {
    let results_block = Block::default().borders(Borders::ALL).title("Scan Results");

    if let ReportView::Failed(message) = &app.view {
        let failure = Paragraph::new(message.as_str())
            .block(results_block)
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true });
        frame.render_widget(failure, area);
        return;
    }

    match app.state {
        AppState::Idle => {
            let instructions = Paragraph::new(
                "Type a domain and press Enter for a detailed lookup.\nPress Enter on an empty box to check the watch list.",
            )
            .block(results_block)
            .wrap(Wrap { trim: true });
            frame.render_widget(instructions, area);
        }
        AppState::LookingUp => {
            let waiting = Paragraph::new("Looking up... Please wait.")
                .block(results_block)
                .style(Style::default().fg(Color::Cyan));
            frame.render_widget(waiting, area);
        }
        AppState::Scanning if app.scan_batch.is_empty() => {
            let scanning_text = Paragraph::new("Scanning... Please wait.")
                .block(results_block)
                .style(Style::default().fg(Color::Cyan));
            frame.render_widget(scanning_text, area);
        }
        _ => render_scan_table(frame, app, results_block, area),
    }
}

fn render_scan_table(frame: &mut Frame, app: &mut App, block: Block, area: Rect) {
    let header = Row::new(["Domain", "Status", "Details"])
        .style(Style::default().bold().underlined());

    let rows: Vec<Row> = app
        .scan_batch
        .iter()
        .skip(app.scroll_offset)
        .map(|result| {
            Row::new(vec![
                Cell::from(result.domain.as_str()),
                Cell::from(result.verdict.to_string()).style(verdict_style(result.verdict)),
                Cell::from(result.detail.as_str()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [Constraint::Length(24), Constraint::Length(11), Constraint::Min(20)],
    )
    .header(header)
    .block(block);
    frame.render_widget(table, area);

    frame.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::VerticalRight),
        area.inner(Margin { vertical: 1, horizontal: 0 }),
        &mut app.report_scroll_state,
    );
}

pub fn verdict_style(verdict: Verdict) -> Style {
    match verdict {
        Verdict::Accessible => Style::default().fg(Color::Green),
        Verdict::Blocked => Style::default().fg(Color::Red),
        Verdict::Error => Style::default().fg(Color::Yellow),
    }
}
