// src/crawl.rs
//! Acquisition: walk the search results region by region and store every
//! listing not seen before.
//!
//! Per region: open the search form, pick the region, submit, then visit result
//! pages 1..=max_pages. Each "Ver vacante" link is fetched only if its
//! `region/id` is not already in the store. The body is written first, the
//! completion log line second, so the log never names a listing that is not on
//! disk. A listing found in the store but not in the log (a run interrupted
//! between the two writes) gets its log line on the next pass.
//!
//! A listing the server answers with an error status is recorded and skipped.
//! A region's pass ends early, without error, when the next page number is
//! missing; any other failure aborts that region only.

use std::collections::HashSet;

use tracing::{debug, error, info, warn};

use crate::{
    browser::Browser,
    config::consts::{LISTING_LINK_TEXT, REGION_SELECT_ID, SEARCH_BUTTON_VALUE},
    config::options::CrawlOptions,
    core::{Fetch, net::pause},
    error::{Error, Result},
    ledger::CompletionLog,
    progress::{NullProgress, Progress},
    region::{ListingKey, Region, listing_id_from_url},
    store::BlobStore,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionOutcome {
    pub region: Region,
    /// Result pages actually opened.
    pub pages: u32,
    pub stored: usize,
    /// Links whose listing was already in the store.
    pub skipped: usize,
    /// Skipped listings that were on disk without a log line and got one.
    pub relogged: usize,
    /// Listings the server refused, with the reason.
    pub failed: Vec<(ListingKey, String)>,
    /// Why the pass stopped early, if it did.
    pub aborted: Option<String>,
}

impl RegionOutcome {
    fn new(region: Region) -> Self {
        Self { region, pages: 0, stored: 0, skipped: 0, relogged: 0, failed: Vec::new(), aborted: None }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    pub regions: Vec<RegionOutcome>,
}

impl CrawlSummary {
    pub fn stored(&self) -> usize {
        self.regions.iter().map(|r| r.stored).sum()
    }
    pub fn skipped(&self) -> usize {
        self.regions.iter().map(|r| r.skipped).sum()
    }
    pub fn relogged(&self) -> usize {
        self.regions.iter().map(|r| r.relogged).sum()
    }
    pub fn failed(&self) -> impl Iterator<Item = &(ListingKey, String)> {
        self.regions.iter().flat_map(|r| &r.failed)
    }
    pub fn aborted(&self) -> impl Iterator<Item = &RegionOutcome> {
        self.regions.iter().filter(|r| r.aborted.is_some())
    }
}

pub struct Crawler<'a, B, F> {
    browser: B,
    fetch: F,
    store: &'a BlobStore,
    log: &'a CompletionLog,
    opts: &'a CrawlOptions,
}

impl<'a, B: Browser, F: Fetch> Crawler<'a, B, F> {
    pub fn new(
        browser: B,
        fetch: F,
        store: &'a BlobStore,
        log: &'a CompletionLog,
        opts: &'a CrawlOptions,
    ) -> Self {
        Self { browser, fetch, store, log, opts }
    }

    /// Crawl every selected region. Only failing to prepare the store or to
    /// read the completion log is fatal; per-region failures are recorded in
    /// the summary.
    pub fn run(&mut self, progress: Option<&mut dyn Progress>) -> Result<CrawlSummary> {
        let mut null = NullProgress;
        let p: &mut dyn Progress = match progress {
            Some(p) => p,
            None => &mut null,
        };

        let regions = self.opts.regions.regions();
        self.store.ensure_regions(&regions)?;
        let mut logged: HashSet<ListingKey> = self.log.replay()?.into_iter().map(|e| e.key).collect();
        p.begin(regions.len());

        let mut summary = CrawlSummary::default();
        for region in regions {
            info!(%region, "crawl: checking region");
            p.log(&format!("Checking: {region}"));

            let mut outcome = RegionOutcome::new(region);
            match self.crawl_region(region, &mut logged, &mut outcome, p) {
                Ok(()) => {
                    info!(%region, pages = outcome.pages, stored = outcome.stored, skipped = outcome.skipped, "crawl: region done");
                    p.item_done(region.name());
                }
                Err(e) => {
                    error!(%region, error = %e, "crawl: region aborted");
                    p.item_failed(region.name(), &e.to_string());
                    outcome.aborted = Some(e.to_string());
                }
            }
            summary.regions.push(outcome);
        }

        p.finish();
        Ok(summary)
    }

    fn crawl_region(
        &mut self,
        region: Region,
        logged: &mut HashSet<ListingKey>,
        outcome: &mut RegionOutcome,
        p: &mut dyn Progress,
    ) -> Result<()> {
        self.browser.navigate(&self.opts.search_url)?;
        self.browser.select_option(REGION_SELECT_ID, region.name())?;
        self.browser.click_control(SEARCH_BUTTON_VALUE)?;

        for page in 1..=self.opts.max_pages {
            match self.browser.click_control(&page.to_string()) {
                Ok(()) => {}
                Err(Error::ControlNotFound { .. }) => {
                    debug!(%region, page, "crawl: no more result pages");
                    p.log(&format!("No more pages for {region}"));
                    break;
                }
                Err(e) => return Err(e),
            }
            outcome.pages += 1;
            pause(self.opts.page_delay);

            for url in self.browser.extract_links(LISTING_LINK_TEXT)? {
                let Some(id) = listing_id_from_url(&url) else {
                    warn!(%region, %url, "crawl: link without listing id");
                    continue;
                };
                let key = ListingKey::new(region, id);
                if self.store.exists(&key) {
                    if !logged.contains(&key) {
                        self.log.append_now(&key)?;
                        warn!(%key, "crawl: stored listing had no log line, appended");
                        outcome.relogged += 1;
                        logged.insert(key);
                    }
                    outcome.skipped += 1;
                    continue;
                }

                let body = match self.fetch.get(&url) {
                    Ok(body) => body,
                    Err(e @ Error::Status { .. }) => {
                        warn!(%key, error = %e, "crawl: listing refused");
                        p.log(&format!("Skipped {key}: {e}"));
                        outcome.failed.push((key, e.to_string()));
                        continue;
                    }
                    Err(e) => return Err(e),
                };
                self.store.write(&key, &body)?;
                self.log.append_now(&key)?;
                outcome.stored += 1;

                info!(%key, bytes = body.len(), "crawl: saved");
                p.log(&format!("Successfully Saved: {key}"));
                logged.insert(key);
                pause(self.opts.item_delay);
            }
        }
        Ok(())
    }
}
