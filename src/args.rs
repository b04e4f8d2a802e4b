pub use clap::Parser;
use std::path::PathBuf;

/// Two lesson countdowns (40 and 13 minutes) in the terminal.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Do not show a desktop notification when a timer completes
    #[arg(long)]
    pub no_notification: bool,

    /// Do not play the completion pulse
    #[arg(long)]
    pub no_pulse: bool,

    /// Write logs to this file, filtered by RUST_LOG (default "info")
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
