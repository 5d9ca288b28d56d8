// src/main.rs

use color_eyre::eyre::Result;
use crossterm::{
    ExecutableCommand,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::io::stdout;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};
use url::Url;

mod app;
mod cli;
mod core;
mod logging;
mod report;
mod ui;

use app::{App, AppEvent, AppState};
use cli::CommandLine;
use crate::core::error::LookupError;
use crate::core::models::ScanConfig;

fn main() -> Result<()> {
    color_eyre::install()?;
    let commands = CommandLine::parse_args();
    // Read while the process is still single-threaded.
    let log_path = logging::initialize_logging(logging::local_offset())?;
    info!(log = %log_path.display(), "Logging initialized.");

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(commands))
}

async fn run(commands: CommandLine) -> Result<()> {
    let config = commands.scan_config();

    if let Some(domain) = &commands.lookup {
        return run_plain_lookup(domain, commands.json).await;
    }
    if commands.non_interactive() {
        return run_plain_scan(commands.domains(), &config, commands.json).await;
    }
    run_tui(App::new(config, commands.domains())).await
}

async fn run_plain_scan(domains: Vec<String>, config: &ScanConfig, json: bool) -> Result<()> {
    if !json {
        println!("Checking website accessibility status...\n");
    }
    let batch = crate::core::scanner::run_scan(domains, config).await?;
    if json {
        println!("{}", report::render_scan_json(&batch)?);
    } else {
        print!("{}", report::render_scan_table(&batch));
        println!("\nScan completed");
    }
    Ok(())
}

async fn run_plain_lookup(domain: &str, json: bool) -> Result<()> {
    let target = host_from_input(domain);
    let lookup = crate::core::lookup::run_domain_lookup(&target).await?;
    if json {
        println!("{}", report::render_lookup_json(&lookup)?);
    } else {
        print!("{}", report::render_lookup(&lookup));
    }
    Ok(())
}

async fn run_tui(mut app: App) -> Result<()> {
    // --- Setup ---
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    let (tx, mut rx) = mpsc::channel(64);
    let outcome = event_loop(&mut terminal, &mut app, &tx, &mut rx).await;

    // --- Restore Terminal ---
    stdout().execute(LeaveAlternateScreen)?;
    stdout().execute(DisableMouseCapture)?;
    disable_raw_mode()?;
    outcome
}

async fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    tx: &mpsc::Sender<AppEvent>,
    rx: &mut mpsc::Receiver<AppEvent>,
) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        if event::poll(Duration::from_millis(100))? {
            handle_events(app, tx)?;
        }

        while let Ok(event) = rx.try_recv() {
            app.apply(event);
        }
    }
    Ok(())
}

/// Routes a key press according to the current state.
fn handle_events(app: &mut App, tx: &mpsc::Sender<AppEvent>) -> Result<()> {
    if let Event::Key(key) = event::read()? {
        if key.kind == KeyEventKind::Press {
            match app.state {
                AppState::Idle => handle_idle_input(app, key.code, tx),
                AppState::Finished => handle_finished_input(app, key.code),
                AppState::Scanning | AppState::LookingUp => match key.code {
                    KeyCode::Char('q') => app.quit(),
                    KeyCode::Up => app.scroll_up(),
                    KeyCode::Down => app.scroll_down(),
                    _ => {}
                },
            }
        }
    }
    Ok(())
}

/// Enter on an empty box scans the watch list; Enter on a domain looks it up.
fn handle_idle_input(app: &mut App, key_code: KeyCode, tx: &mpsc::Sender<AppEvent>) {
    match key_code {
        KeyCode::Char(c) => app.input.push(c),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Esc => app.quit(),
        KeyCode::Enter => {
            if app.input.trim().is_empty() {
                app.begin_scan();
                spawn_scan(app.watchlist.clone(), app.config, tx.clone());
            } else {
                app.begin_lookup();
                spawn_lookup(host_from_input(&app.input), tx.clone());
            }
        }
        _ => {}
    }
}

fn handle_finished_input(app: &mut App, key_code: KeyCode) {
    match key_code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('n') => app.reset(),
        KeyCode::Up => app.scroll_up(),
        KeyCode::Down => app.scroll_down(),
        _ => {}
    }
}

/// Streams scan results to the UI as they complete.
fn spawn_scan(domains: Vec<String>, config: ScanConfig, tx: mpsc::Sender<AppEvent>) {
    tokio::spawn(async move {
        let orchestrator = match crate::core::scanner::network_orchestrator(&config) {
            Ok(o) => o,
            Err(e) => {
                warn!(error = %e, "Could not build the HTTP client.");
                let _ = tx.send(AppEvent::ScanFailed(format!("Failed to build HTTP client: {e}"))).await;
                return;
            }
        };

        let mut handle = orchestrator.spawn(domains);
        let _ = tx.send(AppEvent::ScanStarted { total: handle.total() }).await;
        while let Some(result) = handle.recv().await {
            if tx.send(AppEvent::ScanResult(result)).await.is_err() {
                return;
            }
        }
        let _ = tx.send(AppEvent::ScanFinished).await;
    });
}

fn spawn_lookup(domain: String, tx: mpsc::Sender<AppEvent>) {
    tokio::spawn(async move {
        let outcome = tokio::spawn(async move { crate::core::lookup::run_domain_lookup(&domain).await })
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, "Lookup task failed.");
                Err(LookupError::Internal(e.to_string()))
            });
        let _ = tx.send(AppEvent::LookupFinished(outcome)).await;
    });
}

/// Accepts bare domains as well as pasted URLs and returns just the host.
fn host_from_input(raw_input: &str) -> String {
    let raw_input = raw_input.trim();
    let input_with_scheme = if !raw_input.starts_with("http://") && !raw_input.starts_with("https://") {
        format!("http://{}", raw_input)
    } else {
        raw_input.to_string()
    };
    Url::parse(&input_with_scheme)
        .ok()
        .and_then(|url| url.host_str().map(String::from))
        .unwrap_or_else(|| raw_input.to_string())
}
