//! Terminal entry point.
//!
//! Wires the library together: loads configuration, installs file logging,
//! builds the [`Driver`], then multiplexes stdin commands with the driver's
//! own completions and debounce ticks until `quit` or end of input.
//!
//! # Lifecycle
//!
//! 1. **Load**: Read config (`pixgrid [config.toml]`), validate, init tracing
//! 2. **Initialize**: Dispatch `Event::Initialize`, which fetches page one
//! 3. **Loop**: Whichever comes first, a stdin line or a driver event, is
//!    dispatched; the view is printed again when it changed
//! 4. **Exit**: `Action::Quit` or EOF on stdin
//!
//! # Surface Actions
//!
//! - `ClearSearchInput`: the input line is the user's own, nothing to clear
//! - `ScrollToTop`: the next print starts from the first grid row anyway
//! - `CloseFilterPanel`: reflected in the next print
//! - `Quit`: leave the loop

#![allow(clippy::multiple_crate_versions)]

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use pixgrid::ui::{parse_command, render, Command, HELP};
use pixgrid::{Action, Config, Driver, Event};
use tokio::io::{AsyncBufReadExt, BufReader};

const DEFAULT_COLUMNS: usize = 100;

/// Where the next event came from.
enum Input {
    Line(String),
    Closed,
    Internal(Event),
}

#[tokio::main]
async fn main() -> ExitCode {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = match Config::load(config_path.as_deref()).and_then(|c| c.validate().map(|()| c)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("pixgrid: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(log_path) = pixgrid::observability::init_tracing(&config) {
        tracing::info!(log = %log_path.display(), "pixgrid starting");
    }

    let mut driver = match Driver::from_config(&config) {
        Ok(driver) => driver,
        Err(e) => {
            eprintln!("pixgrid: {e}");
            return ExitCode::FAILURE;
        }
    };

    let cols = terminal_columns();
    run(&mut driver, cols).await;

    tracing::info!("pixgrid exiting");
    ExitCode::SUCCESS
}

async fn run(driver: &mut Driver, cols: usize) {
    if apply(driver, &Event::Initialize, cols) {
        return;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let input = tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => Input::Line(line),
                Ok(None) => Input::Closed,
                Err(e) => {
                    tracing::warn!(error = %e, "stdin read failed");
                    Input::Closed
                }
            },
            event = driver.next_event() => Input::Internal(event),
        };

        let event = match input {
            Input::Closed => break,
            Input::Internal(event) => event,
            Input::Line(line) => match parse_command(&line, Instant::now()) {
                Ok(Command::Event(event)) => event,
                Ok(Command::Help) => {
                    println!("{HELP}");
                    continue;
                }
                Err(e) => {
                    eprintln!("{e}");
                    continue;
                }
            },
        };

        if apply(driver, &event, cols) {
            break;
        }
    }
}

/// Dispatches `event` and prints the view if it changed. Returns true on quit.
fn apply(driver: &mut Driver, event: &Event, cols: usize) -> bool {
    let span = tracing::debug_span!("surface_event");
    let _guard = span.entered();

    match driver.dispatch(event) {
        Ok((changed, actions)) => {
            if changed {
                print!("{}", render(driver.state(), cols));
                let _ = std::io::stdout().flush();
            }
            actions.iter().any(execute_action)
        }
        Err(e) => {
            tracing::debug!(error = %e, "error handling event");
            eprintln!("{e}");
            false
        }
    }
}

/// Returns true when the action ends the session.
fn execute_action(action: &Action) -> bool {
    tracing::debug!(action = ?action, "surface action");
    match action {
        Action::Quit => true,
        Action::ClearSearchInput | Action::ScrollToTop | Action::CloseFilterPanel => false,
        Action::Fetch(_) | Action::Transfer(_) => {
            tracing::warn!(action = ?action, "background action reached the surface");
            false
        }
    }
}

fn terminal_columns() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|c| c.trim().parse().ok())
        .filter(|&c: &usize| c > 0)
        .unwrap_or(DEFAULT_COLUMNS)
}
