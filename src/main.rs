//! # todo
//!
//! A single-screen terminal to-do list. Type a task, add it, mark it done,
//! delete it, and check how many are finished. The list is written to a
//! JSON file after every change and read back on the next start.
//!
//! ```bash
//! todo                       # uses ./tasks.json
//! todo --db ~/notes/todo.json
//! RUST_LOG=todo=debug todo --log-file todo.log
//! ```
//!
//! The file is a JSON array of `{"text": ..., "color": "orange" | "green"}`
//! objects, green meaning done.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::EnvFilter;

pub mod cli;
pub mod db;
pub mod error;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod utils;
}

use cli::Cli;
use tui::run::run_tui;

/// Route tracing output to `path`. The terminal belongs to the UI, so
/// without a log file nothing is recorded.
fn init_logging(path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("todo=info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Some(log_path) = cli.log_file.as_ref() {
        if let Err(e) = init_logging(log_path) {
            eprintln!("Failed to open log file {}: {}", log_path.display(), e);
            std::process::exit(1);
        }
    }

    if let Err(e) = run_tui(&cli.db) {
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
}
