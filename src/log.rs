// src/log.rs
//! Debug log setup.
//!
//! Everything the engines report through `tracing` ends up in
//! `<store_dir>/debug.log` (append, no rotation). `RUST_LOG` filters; default is `info`.
//! Console output is left to the progress sinks.

use std::{fs, io, path::Path};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::consts::DEBUG_LOG_FILE;

/// Install the global subscriber. Keep the returned guard alive for the whole
/// run or buffered lines are lost on exit.
pub fn init(dir: &Path) -> io::Result<WorkerGuard> {
    fs::create_dir_all(dir)?;
    let appender = tracing_appender::rolling::never(dir, DEBUG_LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(writer)
        .try_init();

    Ok(guard)
}
