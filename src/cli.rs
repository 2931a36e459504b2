// src/cli.rs
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};

use crate::config::consts::*;
use crate::config::options::{AppOptions, DayMatching, PathOptions, RegionSelector, RequiredFieldPolicy};
use crate::core::sanitize::strip_accents;
use crate::progress::ConsoleProgress;
use crate::region::Region;
use crate::runner::{self, RunSummary, Task};

#[derive(Parser, Debug)]
#[command(name = "empleo_scrape", version, about = "Crawl, repair and extract empleo.gob.mx job listings")]
pub struct Cli {
    /// Directory holding the store, the completion log and the dataset
    #[arg(short, long, global = true, default_value = ".")]
    pub dir: PathBuf,

    /// Dataset CSV (default: <dir>/data.csv)
    #[arg(short, long, global = true)]
    pub out: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download every listing not yet in the store
    Crawl {
        /// Only this region (repeatable); accents and case are ignored
        #[arg(short, long = "region", value_name = "NAME", value_parser = parse_region)]
        regions: Vec<Region>,

        /// Result pages per region
        #[arg(long, default_value_t = MAX_PAGES)]
        max_pages: u32,

        /// WebDriver endpoint (chromedriver)
        #[arg(long, default_value = WEBDRIVER_URL)]
        webdriver: String,

        #[arg(long, default_value_t = PAGE_DELAY_MS)]
        page_delay_ms: u64,

        #[arg(long, default_value_t = ITEM_DELAY_MS)]
        item_delay_ms: u64,
    },

    /// Re-fetch undersized or error pages in the store
    Repair {
        /// Documents smaller than this many bytes are re-fetched
        #[arg(long, default_value_t = MIN_DOCUMENT_BYTES)]
        min_bytes: u64,

        #[arg(long, default_value_t = REPAIR_DELAY_MS)]
        delay_ms: u64,
    },

    /// Build the dataset CSV from the completion log
    Extract {
        /// What to do when education level or languages are missing
        #[arg(long, value_enum, default_value_t = MissingFields::Drop)]
        required_fields: MissingFields,

        /// How work-day abbreviations are matched
        #[arg(long, value_enum, default_value_t = DayMatch::Tokens)]
        day_matching: DayMatch,
    },

    /// Print descriptive statistics for the dataset
    Report,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum MissingFields {
    Drop,
    Sentinel,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DayMatch {
    Tokens,
    Substring,
}

/// Region by display name, ignoring case and accents (`nuevo leon`).
fn parse_region(s: &str) -> std::result::Result<Region, String> {
    let wanted = strip_accents(s.trim()).to_lowercase();
    Region::ALL
        .iter()
        .copied()
        .find(|r| strip_accents(r.name()).to_lowercase() == wanted)
        .ok_or_else(|| format!("unknown region: {s}"))
}

impl Cli {
    /// Defaults from `config`, overridden by the command line.
    pub fn options(&self) -> (Task, AppOptions) {
        let mut opts = AppOptions { paths: PathOptions::under(&self.dir), ..Default::default() };
        if let Some(out) = &self.out {
            opts.paths.dataset_file = out.clone();
        }

        let task = match &self.command {
            Command::Crawl { regions, max_pages, webdriver, page_delay_ms, item_delay_ms } => {
                if !regions.is_empty() {
                    opts.crawl.regions = RegionSelector::Only(regions.clone());
                }
                opts.crawl.max_pages = *max_pages;
                opts.crawl.webdriver_url = webdriver.clone();
                opts.crawl.page_delay = Duration::from_millis(*page_delay_ms);
                opts.crawl.item_delay = Duration::from_millis(*item_delay_ms);
                Task::Crawl
            }
            Command::Repair { min_bytes, delay_ms } => {
                opts.repair.min_bytes = *min_bytes;
                opts.repair.delay = Duration::from_millis(*delay_ms);
                Task::Repair
            }
            Command::Extract { required_fields, day_matching } => {
                opts.extract.required_fields = match required_fields {
                    MissingFields::Drop => RequiredFieldPolicy::Drop,
                    MissingFields::Sentinel => RequiredFieldPolicy::Sentinel,
                };
                opts.extract.day_matching = match day_matching {
                    DayMatch::Tokens => DayMatching::Tokens,
                    DayMatch::Substring => DayMatching::Substring,
                };
                Task::Extract
            }
            Command::Report => Task::Report,
        };
        (task, opts)
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let (task, opts) = cli.options();

    let _guard = crate::log::init(&opts.paths.store_dir)
        .wrap_err_with(|| format!("cannot open debug log in {}", opts.paths.store_dir.display()))?;

    let mut progress = ConsoleProgress::default();
    let summary = runner::run(task, &opts, Some(&mut progress))?;
    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    match summary {
        RunSummary::Crawl(s) => {
            println!("Stored {} new listings, {} already present", s.stored(), s.skipped());
            if s.relogged() > 0 {
                println!("  {} stored listings were missing from the log and were added", s.relogged());
            }
            for (key, reason) in s.failed() {
                println!("  {key} skipped: {reason}");
            }
            for r in s.aborted() {
                println!("  {} stopped early: {}", r.region, r.aborted.as_deref().unwrap_or_default());
            }
        }
        RunSummary::Repair(r) => {
            println!("Scanned {}, redownloaded {}, failed {}", r.scanned, r.repaired.len(), r.failed.len());
        }
        RunSummary::Extract { records, failures, written } => {
            println!("Wrote {records} records to {}", written.display());
            if !failures.is_empty() {
                println!("{} listings skipped:", failures.len());
                for f in failures {
                    println!("  {}: {}", f.key, f.reason);
                }
            }
        }
        RunSummary::Report(r) => print!("{r}"),
    }
}
