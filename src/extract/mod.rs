// src/extract/mod.rs
//! Extraction: replay the completion log and turn every stored listing into a
//! dataset record.
//!
//! Each log entry is handled on its own. A page that cannot be read, or that
//! lacks a required field, becomes a [`Failure`] in the returned
//! [`Extraction`]; it never stops the batch. Records keep log order and carry
//! the log timestamp's date.
//!
//! Field lookups go through [`crate::core::html::labelled_value`]: the value is
//! the first sibling element of the given tag after the `<strong>` label.

pub mod fields;
pub mod record;

use std::io;

use chrono::NaiveDate;
use scraper::Html;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    config::options::{ExtractOptions, RequiredFieldPolicy},
    core::html::{first_small_text, labelled_value},
    dataset::Dataset,
    error::Result,
    ledger::{CompletionLog, LogEntry},
    progress::{NullProgress, Progress},
    region::ListingKey,
    store::BlobStore,
};

pub use fields::FieldError;
pub use record::{Record, Schedule, Specified, WorkDays, HEADERS};

/// A labelled field: the `<strong>` text and the tag of the value element.
struct Label {
    field: &'static str,
    text: &'static str,
    tag: &'static str,
}

const SALARY: Label = Label { field: "salary", text: "Salario neto mensual:", tag: "span" };
const HOURS: Label = Label { field: "hours", text: "Horario de trabajo:", tag: "span" };
const DAYS: Label = Label { field: "work days", text: "Días laborales:", tag: "span" };
const LOCATION: Label = Label { field: "location", text: "Ubicación:", tag: "span" };
const EDUCATION: Label = Label { field: "education", text: "Estudios Solicitados:", tag: "div" };
const LANGUAGES: Label = Label { field: "languages", text: "Idiomas:", tag: "div" };
const EXPERIENCE: Label = Label { field: "experience", text: "Experiencia:", tag: "div" };
const CONTRACT: Label = Label { field: "contract type", text: "Tipo de contrato:", tag: "span" };

/// Why one listing produced no record.
#[derive(Debug, Error)]
pub enum ExtractFailure {
    #[error("could not load stored page: {0}")]
    Load(#[from] io::Error),

    #[error(transparent)]
    Field(#[from] FieldError),
}

#[derive(Debug)]
pub struct Failure {
    pub key: ListingKey,
    pub reason: ExtractFailure,
}

/// The fold result: every record produced, and every listing that was not.
#[derive(Debug, Default)]
pub struct Extraction {
    pub dataset: Dataset,
    pub failures: Vec<Failure>,
}

fn value(doc: &Html, label: &Label) -> Option<String> {
    labelled_value(doc, label.text, label.tag)
}

fn required(doc: &Html, label: &Label) -> std::result::Result<String, FieldError> {
    value(doc, label).ok_or(FieldError::Missing { field: label.field })
}

/// Required unless the policy allows a sentinel.
fn by_policy(
    doc: &Html,
    label: &Label,
    policy: RequiredFieldPolicy,
) -> std::result::Result<Specified<String>, FieldError> {
    match (value(doc, label), policy) {
        (Some(v), _) => Ok(Specified::Given(v)),
        (None, RequiredFieldPolicy::Sentinel) => Ok(Specified::Unspecified),
        (None, RequiredFieldPolicy::Drop) => Err(FieldError::Missing { field: label.field }),
    }
}

/// Parse one listing page into a record dated `date`.
pub fn parse_listing(html: &str, date: NaiveDate, opts: &ExtractOptions) -> std::result::Result<Record, FieldError> {
    let doc = Html::parse_document(html);

    let caption = first_small_text(&doc).ok_or(FieldError::Missing { field: "title" })?;
    let salary = fields::parse_salary(&required(&doc, &SALARY)?)?;
    let schedule = fields::parse_schedule(&required(&doc, &HOURS)?)?;
    let days = fields::parse_work_days(&required(&doc, &DAYS)?, opts.day_matching);
    let (state, municipality) = fields::split_location(&required(&doc, &LOCATION)?)?;

    Ok(Record {
        date,
        offer: fields::normalize_title(&caption),
        salary,
        contract_type: value(&doc, &CONTRACT).into(),
        schedule,
        days,
        state,
        municipality,
        education_level: by_policy(&doc, &EDUCATION, opts.required_fields)?,
        experience: value(&doc, &EXPERIENCE).into(),
        languages: by_policy(&doc, &LANGUAGES, opts.required_fields)?,
    })
}

pub struct Extractor<'a> {
    store: &'a BlobStore,
    opts: &'a ExtractOptions,
}

impl<'a> Extractor<'a> {
    pub fn new(store: &'a BlobStore, opts: &'a ExtractOptions) -> Self {
        Self { store, opts }
    }

    pub fn extract_entry(&self, entry: &LogEntry) -> std::result::Result<Record, ExtractFailure> {
        let html = self.store.read(&entry.key)?;
        Ok(parse_listing(&html, entry.at.date(), self.opts)?)
    }

    /// Fold `entries` into an [`Extraction`]. Never fails as a whole.
    pub fn run<'e>(
        &self,
        entries: impl IntoIterator<Item = &'e LogEntry>,
        progress: Option<&mut dyn Progress>,
    ) -> Extraction {
        let mut null = NullProgress;
        let p: &mut dyn Progress = match progress {
            Some(p) => p,
            None => &mut null,
        };

        let entries: Vec<&LogEntry> = entries.into_iter().collect();
        p.begin(entries.len());

        let out = entries.into_iter().fold(Extraction::default(), |mut acc, entry| {
            let item = entry.key.to_string();
            match self.extract_entry(entry) {
                Ok(record) => {
                    p.item_done(&item);
                    acc.dataset.records.push(record);
                }
                Err(reason) => {
                    warn!(key = %entry.key, %reason, "extract: skipped");
                    p.item_failed(&item, &reason.to_string());
                    acc.failures.push(Failure { key: entry.key.clone(), reason });
                }
            }
            acc
        });

        info!(records = out.dataset.records.len(), failures = out.failures.len(), "extract: done");
        p.finish();
        out
    }

    /// Replay `log` and extract every entry. Only an unreadable or malformed
    /// log is an error.
    pub fn run_log(&self, log: &CompletionLog, progress: Option<&mut dyn Progress>) -> Result<Extraction> {
        let entries = log.replay()?;
        Ok(self.run(&entries, progress))
    }
}
