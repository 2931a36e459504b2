// src/ledger.rs
//! Completion log: one `region/id,timestamp` line per acquired listing.
//!
//! Append-only. It is the source of truth for what extraction processes, so a
//! line is written only after the document is safely in the store.

use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use chrono::{Local, NaiveDateTime};

use crate::error::{Error, Result};
use crate::region::ListingKey;

const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";
const TS_FORMAT_NO_FRACTION: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    pub key: ListingKey,
    pub at: NaiveDateTime,
}

impl LogEntry {
    fn to_line(&self) -> String {
        format!("{},{}", self.key, self.at.format(TS_FORMAT))
    }

    fn parse_line(line: &str, line_no: usize) -> Result<Self> {
        let bad = |reason: String| Error::LogFormat { line: line_no, reason };

        let (key, ts) = line
            .split_once(',')
            .ok_or_else(|| bad(format!("missing ',' in {line:?}")))?;
        let key = ListingKey::parse(key.trim()).map_err(|e| bad(e.to_string()))?;
        let ts = ts.trim();
        let at = NaiveDateTime::parse_from_str(ts, TS_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(ts, TS_FORMAT_NO_FRACTION))
            .map_err(|e| bad(format!("timestamp {ts:?}: {e}")))?;
        Ok(Self { key, at })
    }
}

#[derive(Clone, Debug)]
pub struct CompletionLog {
    path: PathBuf,
}

impl CompletionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record `key` as acquired now (local time).
    pub fn append_now(&self, key: &ListingKey) -> io::Result<LogEntry> {
        let entry = LogEntry { key: key.clone(), at: Local::now().naive_local() };
        self.append(&entry)?;
        Ok(entry)
    }

    pub fn append(&self, entry: &LogEntry) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{}", entry.to_line())
    }

    /// Every entry in append order. A log that does not exist yet is empty.
    pub fn replay(&self) -> Result<Vec<LogEntry>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(t) => t,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        text.lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| LogEntry::parse_line(line, i + 1))
            .collect()
    }
}
