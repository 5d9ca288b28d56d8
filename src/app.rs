// src/app.rs

use crate::core::error::LookupError;
use crate::core::models::{DomainReport, DomainResult, ScanBatch, ScanConfig, VerdictTally};
use ratatui::widgets::ScrollbarState;

/// Messages sent from background scan/lookup tasks to the UI loop.
#[derive(Debug)]
pub enum AppEvent {
    ScanStarted { total: usize },
    ScanResult(DomainResult),
    ScanFinished,
    ScanFailed(String),
    LookupFinished(Result<DomainReport, LookupError>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Idle,
    Scanning,
    LookingUp,
    Finished,
}

/// What the main panel is showing.
#[derive(Debug)]
pub enum ReportView {
    Empty,
    Scan,
    Lookup(Box<DomainReport>),
    Failed(String),
}

pub struct App {
    pub should_quit: bool,
    pub state: AppState,
    pub input: String,
    pub view: ReportView,
    pub config: ScanConfig,
    pub watchlist: Vec<String>,
    /// Results received so far, in completion order.
    pub scan_batch: ScanBatch,
    pub scan_total: usize,
    pub summary: VerdictTally,
    pub scroll_offset: usize,
    pub report_scroll_state: ScrollbarState,
}

impl App {
    pub fn new(config: ScanConfig, watchlist: Vec<String>) -> Self {
        Self {
            should_quit: false,
            state: AppState::Idle,
            input: String::new(),
            view: ReportView::Empty,
            config,
            watchlist,
            scan_batch: ScanBatch::new(),
            scan_total: 0,
            summary: VerdictTally::default(),
            scroll_offset: 0,
            report_scroll_state: ScrollbarState::default(),
        }
    }

    pub fn begin_scan(&mut self) {
        self.state = AppState::Scanning;
        self.view = ReportView::Scan;
        self.scan_batch = ScanBatch::new();
        self.scan_total = self.watchlist.len();
        self.summary = VerdictTally::default();
        self.reset_scroll();
    }

    pub fn begin_lookup(&mut self) {
        self.state = AppState::LookingUp;
        self.view = ReportView::Empty;
        self.reset_scroll();
    }

    /// Folds a background event into the UI state.
    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::ScanStarted { total } => self.scan_total = total,
            AppEvent::ScanResult(result) => {
                self.summary.record(result.verdict);
                self.scan_batch.push(result);
                self.report_scroll_state = self.report_scroll_state.content_length(self.scan_batch.len());
            }
            AppEvent::ScanFinished => self.state = AppState::Finished,
            AppEvent::ScanFailed(message) => {
                self.view = ReportView::Failed(message);
                self.state = AppState::Finished;
            }
            AppEvent::LookupFinished(Ok(report)) => {
                self.report_scroll_state = self.report_scroll_state.content_length(lookup_line_count(&report));
                self.view = ReportView::Lookup(Box::new(report));
                self.state = AppState::Finished;
            }
            AppEvent::LookupFinished(Err(e)) => {
                self.view = ReportView::Failed(e.to_string());
                self.state = AppState::Finished;
            }
        }
    }

    /// Fraction of the current scan that has completed, in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        if self.scan_total == 0 {
            return 0.0;
        }
        (self.scan_batch.len() as f64 / self.scan_total as f64).min(1.0)
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
        self.report_scroll_state = self.report_scroll_state.position(self.scroll_offset);
    }

    /// Number of scrollable rows in the current view.
    pub fn content_length(&self) -> usize {
        match &self.view {
            ReportView::Scan => self.scan_batch.len(),
            ReportView::Lookup(report) => lookup_line_count(report),
            ReportView::Empty | ReportView::Failed(_) => 0,
        }
    }

    /// Scrolls one row down, stopping at the last row of the current view.
    pub fn scroll_down(&mut self) {
        let last = self.content_length().saturating_sub(1);
        self.scroll_offset = (self.scroll_offset + 1).min(last);
        self.report_scroll_state = self.report_scroll_state.position(self.scroll_offset);
    }

    fn reset_scroll(&mut self) {
        self.scroll_offset = 0;
        self.report_scroll_state = ScrollbarState::default();
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn reset(&mut self) {
        self.state = AppState::Idle;
        self.input = String::new();
        self.view = ReportView::Empty;
        self.scan_batch = ScanBatch::new();
        self.scan_total = 0;
        self.summary = VerdictTally::default();
        self.reset_scroll();
    }
}

/// Lines the lookup view renders for `report`: address and ping, a spacer,
/// a heading plus one line per entry for each record kind, and the dates
/// block when either date is known.
pub fn lookup_line_count(report: &DomainReport) -> usize {
    let records: usize = report.records.values().map(|entries| 1 + entries.len()).sum();
    let dates = [&report.creation_date, &report.expiration_date]
        .iter()
        .filter(|date| date.is_some())
        .count();
    let dates_block = if dates > 0 { 1 + dates } else { 0 };
    3 + records + dates_block
}
