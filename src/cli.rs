use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "situation-monitor", version, about = "Terminal market dashboard with a draggable, persistent grid layout")]
pub struct Cli {
    /// Directory holding the persisted layout (and the default log file).
    #[arg(long, value_name = "DIR")]
    pub state_dir: Option<PathBuf>,

    /// Event-loop poll interval in milliseconds.
    #[arg(long, default_value_t = 16, value_name = "MS")]
    pub tick_ms: u64,

    /// Discard any saved layout and start from the default arrangement.
    #[arg(long)]
    pub reset: bool,

    /// Write logs here instead of into the state directory.
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}
