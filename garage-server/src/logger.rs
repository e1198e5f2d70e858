//! Logging Infrastructure
//!
//! `RUST_LOG` wins over the configured level. Output goes to stdout, or to a
//! daily-rolling file when a log directory exists.

use std::path::Path;

use tracing_subscriber::EnvFilter;

const LOG_FILE_PREFIX: &str = "garage-server";

/// Default filter for a level: our crates, auth events and the HTTP layer at `level`
fn default_directives(level: &str) -> String {
    format!("garage_server={level},shared={level},security={level},tower_http={level},sqlx=warn")
}

/// Initialize the global subscriber
pub fn init_logger(log_level: &str, json: bool, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(log_level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    let log_dir = log_dir.map(Path::new).filter(|dir| dir.exists());

    match (json, log_dir) {
        (true, Some(dir)) => builder
            .json()
            .with_writer(tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX))
            .init(),
        (true, None) => builder.json().init(),
        (false, Some(dir)) => builder
            .with_ansi(false)
            .with_writer(tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX))
            .init(),
        (false, None) => builder.init(),
    }
}
