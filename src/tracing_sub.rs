use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::Level;

/// Initialize the global tracing subscriber.
///
/// With a resolvable log path the subscriber appends there; otherwise it
/// falls back to stderr, which is only readable when the process is not
/// holding the terminal. Safe to call multiple times; subsequent calls are
/// no-ops for the global subscriber.
pub fn init_default(log_file: Option<PathBuf>) {
    let file = log_file.and_then(|path| {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        OpenOptions::new().create(true).append(true).open(path).ok()
    });
    match file {
        Some(file) => {
            let _ = tracing_subscriber::fmt()
                .with_max_level(Level::DEBUG)
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .with_target(false)
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_max_level(Level::DEBUG)
                .with_writer(io::stderr)
                .with_target(false)
                .try_init();
        }
    }
}
