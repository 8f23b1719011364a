//! Tally - terminal keypad calculator
//!
//! A four-function calculator implemented as a pure input state machine
//! with a ratatui front-end and a scripted replay mode.

mod engine;
mod tui;
mod wire;

use std::fs::OpenOptions;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging()?;

    match std::env::args().nth(1).as_deref() {
        None => tui::run()?,
        Some("replay") => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            let state = wire::replay(stdin.lock(), stdout.lock())?;
            tracing::info!(entry = %state.display_current(), "replay finished");
        }
        Some(other) => {
            eprintln!("unknown mode: {other}");
            eprintln!("usage: tally [replay]");
            std::process::exit(2);
        }
    }

    Ok(())
}

/// Initialize logging. The terminal owns stdout, so log lines go to the
/// file named by TALLY_LOG; with the variable unset, events are dropped.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let Some(path) = std::env::var_os("TALLY_LOG") else {
        return Ok(());
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tally=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(Arc::new(file)),
        )
        .init();

    Ok(())
}
