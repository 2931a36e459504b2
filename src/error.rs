// src/error.rs
//! Crate-level error type.
//!
//! Engines return `Result<T>` and decide locally which failures are fatal for
//! the current item, the current region, or nothing at all. Field-level
//! extraction problems have their own type in `extract::FieldError`.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("WebDriver {command} failed: {message}")]
    WebDriver { command: String, message: String },

    /// The search UI has no element matching `selector` (e.g. a page number
    /// past the last result page).
    #[error("control not found: {selector}")]
    ControlNotFound { selector: String },

    #[error("completion log line {line}: {reason}")]
    LogFormat { line: usize, reason: String },

    #[error("unknown region: {0}")]
    UnknownRegion(String),

    #[error("invalid listing id: {0:?}")]
    InvalidListingId(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
