// src/runner.rs
use std::path::PathBuf;

use tracing::info;

use crate::{
    browser::WebDriver,
    config::options::AppOptions,
    core::FetchClient,
    crawl::{CrawlSummary, Crawler},
    dataset::Dataset,
    error::Result,
    extract::{Extractor, Failure},
    ledger::CompletionLog,
    progress::Progress,
    repair::{RepairReport, Repairer},
    report::Report,
    store::BlobStore,
};

/// One pipeline stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Task {
    Crawl,
    Repair,
    Extract,
    Report,
}

/// What a stage produced.
#[derive(Debug)]
pub enum RunSummary {
    Crawl(CrawlSummary),
    Repair(RepairReport),
    Extract {
        records: usize,
        failures: Vec<Failure>,
        written: PathBuf,
    },
    Report(Report),
}

/// Top-level runner: build the stage's collaborators from `opts` and run it.
/// `progress` can be None (no UI updates) or Some(&mut impl Progress).
pub fn run(task: Task, opts: &AppOptions, progress: Option<&mut dyn Progress>) -> Result<RunSummary> {
    let store = BlobStore::new(&opts.paths.store_dir);
    let log = CompletionLog::new(&opts.paths.log_file);
    info!(?task, store = %store.root().display(), "run: start");

    match task {
        Task::Crawl => {
            let browser = WebDriver::connect(&opts.crawl.webdriver_url)?;
            let fetch = FetchClient::new()?;
            let summary = Crawler::new(browser, fetch, &store, &log, &opts.crawl).run(progress)?;
            Ok(RunSummary::Crawl(summary))
        }
        Task::Repair => {
            let fetch = FetchClient::new()?;
            let report = Repairer::new(fetch, &store, &opts.repair).sweep(progress)?;
            Ok(RunSummary::Repair(report))
        }
        Task::Extract => extract(&store, &log, opts, progress),
        Task::Report => {
            let table = Dataset::read_rows(&opts.paths.dataset_file)?;
            Ok(RunSummary::Report(Report::from_table(&table)))
        }
    }
}

fn extract(
    store: &BlobStore,
    log: &CompletionLog,
    opts: &AppOptions,
    progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    let out = Extractor::new(store, &opts.extract).run_log(log, progress)?;
    let written = opts.paths.dataset_file.clone();
    out.dataset.write_csv(&written)?;
    info!(records = out.dataset.len(), path = %written.display(), "run: dataset written");

    Ok(RunSummary::Extract { records: out.dataset.len(), failures: out.failures, written })
}
