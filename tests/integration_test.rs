// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.
use std::path::{Path, PathBuf};

use squid_stats::catalog::Catalog;
use squid_stats::ingest::{self, IngestSummary, LineSource, Progress};
use squid_stats::registry::{Counters, Registry};
use squid_stats::report::{DisplayOptions, Layout, Report, ReportRow};

fn get_fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn get_default_catalog() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("share")
        .join("default.srs")
}

/// Load a catalog and ingest the given fixture logs.
fn run(catalog: &Path, logs: &[&str]) -> (Catalog, Registry, IngestSummary) {
    let catalog = Catalog::from_file(catalog).expect("Should load catalog");
    let mut registry = Registry::seeded(&catalog);
    let sources: Vec<LineSource> = logs
        .iter()
        .map(|log| LineSource::File(get_fixtures_dir().join(log)))
        .collect();
    let total = ingest::total_size(&sources).expect("Should stat fixtures");
    let mut progress = Progress::hidden(total);
    let summary = ingest::ingest(&mut registry, &sources, &mut progress)
        .expect("Should ingest fixtures");
    assert_eq!(progress.done(), total, "All input bytes should be consumed");
    (catalog, registry, summary)
}

fn counters(occurrences: u64, size: u64, elapsed_ms: u64) -> Counters {
    Counters {
        occurrences,
        size,
        elapsed_ms,
    }
}

fn sum<'a>(report: &'a Report, code: &str) -> &'a ReportRow {
    report
        .sums()
        .find(|row| row.code() == code)
        .unwrap_or_else(|| panic!("Missing sum row {code}"))
}

#[test]
fn test_end_to_end_example() {
    let (catalog, registry, summary) = run(&get_fixtures_dir().join("simple.srs"), &["simple.log"]);
    assert_eq!(summary.records, 3);
    assert_eq!(summary.skipped, 0);

    assert_eq!(
        registry.get("TCP_HIT").unwrap().counters(),
        counters(2, 800, 150)
    );
    assert_eq!(
        registry.get("TCP_MISS").unwrap().counters(),
        counters(1, 1500, 200)
    );

    let report = Report::new(&registry, &catalog);
    assert_eq!(report.total().counters(), counters(3, 2300, 350));
    assert_eq!(sum(&report, "HIT").counters(), counters(2, 800, 150));
    assert_eq!(sum(&report, "MISS").counters(), counters(1, 1500, 200));
    assert!(report.unknown().counters().is_empty());
}

#[test]
fn test_default_catalog_with_native_log() {
    let (catalog, registry, summary) = run(&get_default_catalog(), &["access.log"]);
    assert_eq!(summary.lines, 7);
    assert_eq!(summary.records, 6);
    assert_eq!(summary.skipped, 1);

    // Codes from the catalog plus the single unknown one.
    assert_eq!(registry.len(), catalog.entries().len() + 1);
    let unknown = registry
        .get("TAG_NONE")
        .expect("Unknown code should be created");
    assert_eq!(unknown.kind(), None);

    let report = Report::new(&registry, &catalog);
    assert_eq!(sum(&report, "HIT").counters(), counters(2, 2000, 7));
    assert_eq!(
        sum(&report, "MISS").counters(),
        counters(2, 2_504_851, 60_265)
    );
    assert_eq!(sum(&report, "ERROR").counters(), counters(1, 1536, 12));
    assert_eq!(report.unknown().counters(), counters(1, 0, 0));
    assert_eq!(report.total().counters(), counters(6, 2_508_387, 60_284));

    let occurrences: u64 = report
        .results()
        .iter()
        .map(|row| row.counters().occurrences)
        .sum();
    assert_eq!(occurrences, report.total().counters().occurrences);
}

#[test]
fn test_machine_report() {
    let (catalog, registry, _) = run(&get_fixtures_dir().join("simple.srs"), &["simple.log"]);
    let output = squid_stats::report::render(&registry, &catalog, &DisplayOptions::default());
    let total = "TOTAL UNKNOWN 3 2300 0.35 6571.428571428572 766.6666666666666";
    assert_eq!(output.lines().last(), Some(total));
    assert!(!output.contains("[-"));
}

#[test]
fn test_human_report_hides_unknown_codes() {
    let (catalog, registry, _) = run(&get_default_catalog(), &["access.log"]);
    let options = DisplayOptions {
        layout: Layout::Human,
        ..DisplayOptions::default()
    };
    let output = squid_stats::report::render(&registry, &catalog, &options);
    assert!(output.starts_with("[-RESULTS-]"));
    assert!(!output.contains(" TAG_NONE\n"));
    assert!(
        !output.contains(" TCP_HIT\n"),
        "Empty codes should be hidden"
    );
    assert!(output.contains(" TCP_TUNNEL\n"));
    assert!(output.contains(" UNKNOWN\n"));
    assert!(output.contains("2.5 MB"));
    assert!(output.contains("1.0 minutes"));

    let options = DisplayOptions {
        show_unknown: true,
        ..options
    };
    let output = squid_stats::report::render(&registry, &catalog, &options);
    assert!(output.contains(" TAG_NONE\n"));
}

#[test]
fn test_report_json() {
    let (catalog, registry, _) = run(&get_default_catalog(), &["access.log"]);
    let report = Report::new(&registry, &catalog);
    let json_str = serde_json::to_string(&report)
        .expect("Should serialize report to JSON");
    let json: serde_json::Value = serde_json::from_str(&json_str).expect("Should parse JSON");

    assert_eq!(json["total"]["occurrences"].as_u64(), Some(6));
    assert_eq!(json["unknown"]["code"].as_str(), Some("UNKNOWN"));
    let results = json["results"]
        .as_array()
        .expect("results should be an array");
    assert_eq!(results.len(), registry.len());
    assert_eq!(results[0]["code"].as_str(), Some("TAG_NONE"));
    assert!(results[0]["type"].is_null());
    assert!(results[0]["average_speed"].is_null());
}
