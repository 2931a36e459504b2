// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod region;

pub mod browser;
pub mod crawl;
pub mod csv;
pub mod dataset;
pub mod extract;
pub mod ledger;
pub mod log;
pub mod progress;
pub mod repair;
pub mod report;
pub mod runner;
pub mod store;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{Error, Result};
