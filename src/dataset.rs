// src/dataset.rs
//! The extracted dataset and its CSV file.

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::Path,
};

use crate::csv::{parse_rows, write_row};
use crate::extract::record::{HEADERS, Record};

const SEP: char = ',';

/// Records in completion-log order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    pub records: Vec<Record>,
}

/// A dataset file read back as text: header row plus data rows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cells of column `name`; empty when the column does not exist.
    pub fn values<'a>(&'a self, name: &str) -> Vec<&'a str> {
        match self.column(name) {
            Some(i) => self.rows.iter().filter_map(|r| r.get(i).map(String::as_str)).collect(),
            None => Vec::new(),
        }
    }
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Write header and rows to `path`, replacing any previous file.
    pub fn write_csv(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                ensure_directory(parent)?;
            }
        }
        let mut out = BufWriter::new(File::create(path)?);
        write_row(&mut out, &HEADERS[..], SEP)?;
        for record in &self.records {
            write_row(&mut out, &record.to_row()[..], SEP)?;
        }
        out.flush()
    }

    /// Read a dataset file back as strings.
    pub fn read_rows(path: &Path) -> io::Result<Table> {
        let text = fs::read_to_string(path)?;
        let mut rows = parse_rows(text.trim_start_matches('\u{feff}'), SEP);
        if rows.is_empty() {
            return Ok(Table::default());
        }
        let headers = rows.remove(0);
        Ok(Table { headers, rows })
    }
}

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::other(format!("Path exists but is not a directory: {}", dir.display())));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
