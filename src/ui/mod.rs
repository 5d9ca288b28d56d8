// src/ui/mod.rs

use crate::app::{App, ReportView};
use ratatui::prelude::*;

mod layout;
mod widgets;

pub fn render(app: &mut App, frame: &mut Frame) {
    let layout = layout::create_layout(frame.area());

    widgets::input::render_input(frame, app, layout.input);

    // The main panel shows whichever report is current.
    if matches!(app.view, ReportView::Lookup(_)) {
        widgets::lookup_view::render_lookup_view(frame, app, layout.report);
    } else {
        widgets::results::render_results(frame, app, layout.report);
    }

    widgets::summary::render_summary(frame, app, layout.summary);
    widgets::footer::render_footer(frame, app, layout.footer);
}
