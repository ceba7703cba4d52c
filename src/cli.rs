use std::path::PathBuf;

use clap::Parser;

/// Single-screen to-do list.
/// Tasks are stored in ./tasks.json or a path passed via --db.
#[derive(Parser, Debug)]
#[command(name = "todo", version, about = "Terminal to-do list")]
pub struct Cli {
    /// Path to the JSON task file.
    #[arg(long, default_value = "tasks.json")]
    pub db: PathBuf,

    /// Write diagnostic logs to this file (filter with RUST_LOG).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
