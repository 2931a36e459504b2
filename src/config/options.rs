// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;
use crate::region::Region;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AppOptions {
    pub paths: PathOptions,
    pub crawl: CrawlOptions,
    pub repair: RepairOptions,
    pub extract: ExtractOptions,
}

/// Where the store, the completion log and the dataset live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathOptions {
    pub store_dir: PathBuf,
    pub log_file: PathBuf,
    pub dataset_file: PathBuf,
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from(STORE_DIR),
            log_file: PathBuf::from(COMPLETION_LOG_FILE),
            dataset_file: PathBuf::from(DATASET_FILE),
        }
    }
}

impl PathOptions {
    /// Rooted at `dir` instead of the working directory.
    pub fn under(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            store_dir: dir.join(STORE_DIR),
            log_file: dir.join(COMPLETION_LOG_FILE),
            dataset_file: dir.join(DATASET_FILE),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegionSelector {
    All,
    Only(Vec<Region>),
}

impl RegionSelector {
    pub fn regions(&self) -> Vec<Region> {
        match self {
            RegionSelector::All => Region::ALL.to_vec(),
            RegionSelector::Only(v) => v.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrawlOptions {
    pub regions: RegionSelector,
    pub search_url: String,
    pub webdriver_url: String,
    pub max_pages: u32,
    pub page_delay: Duration,
    pub item_delay: Duration,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            regions: RegionSelector::All,
            search_url: SEARCH_URL.to_string(),
            webdriver_url: WEBDRIVER_URL.to_string(),
            max_pages: MAX_PAGES,
            page_delay: Duration::from_millis(PAGE_DELAY_MS),
            item_delay: Duration::from_millis(ITEM_DELAY_MS),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepairOptions {
    /// Documents strictly smaller than this are re-fetched.
    pub min_bytes: u64,
    pub error_marker: String,
    pub url_prefix: String,
    pub url_suffix: String,
    pub delay: Duration,
}

impl Default for RepairOptions {
    fn default() -> Self {
        Self {
            min_bytes: MIN_DOCUMENT_BYTES,
            error_marker: ERROR_MARKER.to_string(),
            url_prefix: REPAIR_URL_PREFIX.to_string(),
            url_suffix: REPAIR_URL_SUFFIX.to_string(),
            delay: Duration::from_millis(REPAIR_DELAY_MS),
        }
    }
}

impl RepairOptions {
    pub fn canonical_url(&self, id: &str) -> String {
        format!("{}{}{}", self.url_prefix, id, self.url_suffix)
    }
}

/// What to do when education level or languages are absent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RequiredFieldPolicy {
    /// Drop the record and report it.
    #[default]
    Drop,
    /// Keep the record with the "not specified" sentinel.
    Sentinel,
}

/// How the working-days text is turned into day flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DayMatching {
    /// Split on non-letters and match whole abbreviations.
    #[default]
    Tokens,
    /// Plain substring containment, as the first extraction scripts did.
    Substring,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ExtractOptions {
    pub required_fields: RequiredFieldPolicy,
    pub day_matching: DayMatching,
}
