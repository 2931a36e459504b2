// src/repair.rs
//! Repair sweep over the whole store.
//!
//! A document is re-fetched from its canonical URL when it is smaller than the
//! size threshold (error and interstitial pages are small), and again,
//! independently, when its content carries the error marker. Nothing else is
//! ever fetched, so a clean store costs one read per document. There is no
//! retry ceiling: a document still broken after a sweep is caught by the next.

use tracing::{error, info};

use crate::{
    config::options::RepairOptions,
    core::{Fetch, net::pause},
    error::Result,
    progress::{NullProgress, Progress},
    region::ListingKey,
    store::BlobStore,
};

/// Why a document was re-fetched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Suspect {
    Undersized,
    ErrorMarker,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RepairReport {
    pub scanned: usize,
    /// Every successful re-fetch, in sweep order. A key can appear twice.
    pub repaired: Vec<(ListingKey, Suspect)>,
    pub failed: Vec<(ListingKey, String)>,
}

pub struct Repairer<'a, F> {
    fetch: F,
    store: &'a BlobStore,
    opts: &'a RepairOptions,
}

impl<'a, F: Fetch> Repairer<'a, F> {
    pub fn new(fetch: F, store: &'a BlobStore, opts: &'a RepairOptions) -> Self {
        Self { fetch, store, opts }
    }

    /// One full sweep. Per-document failures are reported and skipped; only
    /// failing to list the store is an error.
    pub fn sweep(&self, progress: Option<&mut dyn Progress>) -> Result<RepairReport> {
        let mut null = NullProgress;
        let p: &mut dyn Progress = match progress {
            Some(p) => p,
            None => &mut null,
        };

        let keys = self.store.enumerate()?;
        p.begin(keys.len());

        let mut report = RepairReport::default();
        for key in keys {
            report.scanned += 1;
            if let Err(e) = self.check(&key, &mut report, p) {
                error!(%key, error = %e, "repair: failed");
                p.item_failed(&key.to_string(), &e.to_string());
                report.failed.push((key, e.to_string()));
            }
        }

        info!(scanned = report.scanned, repaired = report.repaired.len(), failed = report.failed.len(), "repair: sweep done");
        p.finish();
        Ok(report)
    }

    fn check(&self, key: &ListingKey, report: &mut RepairReport, p: &mut dyn Progress) -> Result<()> {
        if self.store.size(key)? < self.opts.min_bytes {
            self.redownload(key, Suspect::Undersized, report, p)?;
        }
        if self.store.read(key)?.contains(&self.opts.error_marker) {
            p.log(&format!("Error marker in {key}"));
            self.redownload(key, Suspect::ErrorMarker, report, p)?;
        }
        Ok(())
    }

    fn redownload(&self, key: &ListingKey, why: Suspect, report: &mut RepairReport, p: &mut dyn Progress) -> Result<()> {
        let url = self.opts.canonical_url(&key.id);
        let body = self.fetch.get(&url)?;
        self.store.write(key, &body)?;

        info!(%key, ?why, bytes = body.len(), "repair: redownloaded");
        p.item_done(&format!("Redownloaded: {key}"));
        report.repaired.push((key.clone(), why));
        pause(self.opts.delay);
        Ok(())
    }
}
