//! Logging setup
//!
//! Logging is off unless FLASHCARDS_LOG names a level (e.g. `debug`).
//! CLI commands log to stderr; the TUI logs to a file because it owns
//! the terminal.

use std::fs::File;

use flashcards_core::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log level
const LOG_ENV: &str = "FLASHCARDS_LOG";

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::new(format!("flashcards_core={},flashcards={}", level, level))
}

/// Initialize stderr logging for one-shot commands
pub fn init_cli_logging() {
    let Ok(log_level) = std::env::var(LOG_ENV) else {
        return;
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(&log_level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Initialize file logging for TUI mode
///
/// Logs to `config.log_file`, or `{data_dir}/debug.log` when unset.
pub fn init_tui_logging(config: &Config) {
    let Ok(log_level) = std::env::var(LOG_ENV) else {
        return;
    };

    let log_path = config.log_path();
    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
            return;
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(&log_level))
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("TUI logging initialized to {:?}", log_path);
}
