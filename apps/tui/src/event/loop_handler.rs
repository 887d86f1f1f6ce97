use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{Stdout, Write};
use std::time::Duration;

use crate::app::{handle_input, App};
use crate::domain::SelectionReport;
use crate::ui;

/// Event poll timeout
const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Run the application in headless mode (no UI)
pub fn run_headless(app: &App, json: bool) -> Result<()> {
    let report = app.report();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    print_report(&mut out, &report, json)?;
    out.flush()?;
    Ok(())
}

/// Writes the selection report as plain text or pretty JSON.
pub fn print_report(out: &mut impl Write, report: &SelectionReport, json: bool) -> Result<()> {
    if json {
        let json = serde_json::to_string_pretty(report)?;
        writeln!(out, "{json}")?;
        return Ok(());
    }

    writeln!(out, "Interactive TSO Map in Europe")?;
    writeln!(out, "=============================")?;
    writeln!(
        out,
        "Map center: {:.4}, {:.4}",
        report.center.lat, report.center.lon
    )?;
    writeln!(out)?;
    for line in &report.panel {
        writeln!(out, "{line}")?;
    }

    Ok(())
}

/// Run the main application event loop. Every key press is one
/// synchronize-and-redraw cycle.
pub fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        // Draw the UI with better error context
        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if !matches!(event::poll(EVENT_POLL_TIMEOUT), Ok(true)) {
            continue;
        }

        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                handle_input(app, key.code);
                if !app.running {
                    break;
                }
            }
            Ok(Event::Resize(_, _)) => {
                // Force a redraw after resize
                if terminal.draw(|f| ui::ui(app, f)).is_err() {
                    // Non-fatal redraw error
                }
            }
            Ok(_) | Err(_) => {
                // Ignore non-key events
            }
        }
    }
    Ok(())
}
