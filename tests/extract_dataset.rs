// tests/extract_dataset.rs
mod common;

use std::fs;

use chrono::NaiveDate;
use common::listing_page;
use empleo_scrape::config::options::{ExtractOptions, RequiredFieldPolicy};
use empleo_scrape::dataset::Dataset;
use empleo_scrape::extract::{ExtractFailure, Extractor, FieldError, HEADERS};
use empleo_scrape::ledger::{CompletionLog, LogEntry};
use empleo_scrape::region::{ListingKey, Region};
use empleo_scrape::store::BlobStore;

fn entry(region: Region, id: &str, day: u32) -> LogEntry {
    LogEntry {
        key: ListingKey::new(region, id),
        at: NaiveDate::from_ymd_opt(2020, 6, day).unwrap().and_hms_micro_opt(10, 30, 0, 125).unwrap(),
    }
}

struct Fixture {
    dir: tempfile::TempDir,
    store: BlobStore,
    log: CompletionLog,
}

/// Four listings in the log; the third has no education level.
fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let store = BlobStore::new(dir.path().join("states"));
    let log = CompletionLog::new(dir.path().join("log.txt"));

    let listings = [
        (entry(Region::Jalisco, "11", 1), listing_page("Cajero - Sucursal 4", Some("Secundaria"))),
        (entry(Region::Jalisco, "12", 1), listing_page("Ayudante de Cocina", Some("Primaria"))),
        (entry(Region::Yucatan, "31", 2), listing_page("Guardia de Seguridad", None)),
        (entry(Region::Yucatan, "32", 3), listing_page("Técnico en Refrigeración", Some("Técnica"))),
    ];
    for (e, html) in &listings {
        store.write(&e.key, html).unwrap();
        log.append(e).unwrap();
    }
    Fixture { dir, store, log }
}

#[test]
fn one_bad_listing_costs_one_row() {
    let f = fixture();
    let opts = ExtractOptions::default();

    let out = Extractor::new(&f.store, &opts).run_log(&f.log, None).unwrap();
    assert_eq!(out.dataset.len(), 3);
    assert_eq!(out.failures.len(), 1);
    assert_eq!(out.failures[0].key, ListingKey::new(Region::Yucatan, "31"));
    assert!(matches!(
        out.failures[0].reason,
        ExtractFailure::Field(FieldError::Missing { field: "education" })
    ));

    let offers: Vec<&str> = out.dataset.records.iter().map(|r| r.offer.as_str()).collect();
    assert_eq!(offers, vec!["cajero", "ayudante cocina", "tecnico refrigeracion"]);
    assert_eq!(out.dataset.records[2].date, NaiveDate::from_ymd_opt(2020, 6, 3).unwrap());
}

#[test]
fn sentinel_policy_keeps_every_listing() {
    let f = fixture();
    let opts = ExtractOptions { required_fields: RequiredFieldPolicy::Sentinel, ..Default::default() };

    let out = Extractor::new(&f.store, &opts).run_log(&f.log, None).unwrap();
    assert_eq!(out.dataset.len(), 4);
    assert!(out.failures.is_empty());
}

#[test]
fn logged_listing_missing_from_store_is_a_load_failure() {
    let f = fixture();
    f.log.append(&entry(Region::Sonora, "404", 4)).unwrap();

    let opts = ExtractOptions::default();
    let out = Extractor::new(&f.store, &opts).run_log(&f.log, None).unwrap();
    assert_eq!(out.dataset.len(), 3);
    assert_eq!(out.failures.len(), 2);
    assert!(matches!(out.failures[1].reason, ExtractFailure::Load(_)));
}

#[test]
fn dataset_file_has_fixed_header_and_one_line_per_record() {
    let f = fixture();
    let opts = ExtractOptions::default();
    let out = Extractor::new(&f.store, &opts).run_log(&f.log, None).unwrap();

    let path = f.dir.path().join("data.csv");
    out.dataset.write_csv(&path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next().unwrap(), HEADERS.join(","));
    assert_eq!(lines.count(), 3);

    let table = Dataset::read_rows(&path).unwrap();
    assert_eq!(table.values("isodate"), vec!["2020-06-01", "2020-06-01", "2020-06-03"]);
    assert_eq!(table.values("salary"), vec!["10500"; 3]);
    assert_eq!(table.values("hours_worked"), vec!["9.0"; 3]);
    assert_eq!(table.values("days_worked"), vec!["5"; 3]);
    assert_eq!(table.values("state"), vec!["Jalisco"; 3]);
    assert_eq!(table.values("municipality"), vec!["Guadalajara"; 3]);
}
