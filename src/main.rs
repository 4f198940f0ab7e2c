// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.
mod args;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use args::Args;
use squid_stats::catalog::Catalog;
use squid_stats::ingest::{self, IngestSummary, LineSource, Progress};
use squid_stats::logging::init_logging;
use squid_stats::registry::Registry;
use squid_stats::report::Report;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();
    let catalog = load_catalog(&args.srs)?;
    let mut registry = Registry::seeded(&catalog);
    ingest_sources(&mut registry, &args.sources(), args.progress)?;
    let report = Report::new(&registry, &catalog);
    if let Some(path) = &args.json {
        write_report_to_file(&report, path)?;
    }
    print_report(&report.render(&args.display_options()))
}

/// Load the catalog of result codes.
///
/// # Errors
/// Returns an error if the catalog cannot be read or is malformed.
fn load_catalog(path: &Path) -> Result<Catalog> {
    let catalog = Catalog::from_file(path)
        .with_context(|| format!("Failed to load catalog: {}", path.display()))?;
    tracing::info!(
        catalog = %path.display(),
        types = catalog.types().len(),
        codes = catalog.entries().len(),
        "Catalog loaded"
    );
    Ok(catalog)
}

/// Account all log sources to the registry.
///
/// # Errors
/// Returns an error if a log source cannot be stat'ed, opened or read.
fn ingest_sources(
    registry: &mut Registry,
    sources: &[LineSource],
    show_progress: bool,
) -> Result<IngestSummary> {
    let total = ingest::total_size(sources).with_context(|| "Failed to inspect log files")?;
    let mut progress = if show_progress {
        Progress::with_bar(total)
    } else {
        Progress::hidden(total)
    };
    ingest::ingest(registry, sources, &mut progress).with_context(|| "Failed to read log lines")
}

/// Write the report to a file.
///
/// # Errors
/// Returns an error if the report cannot be serialized to JSON or if the file cannot be created.
fn write_report_to_file(report: &Report, dest: &Path) -> Result<()> {
    tracing::info!(file = %dest.display(), "Writing report to file");
    let file = File::create(dest)
        .with_context(|| format!("Failed to create JSON output file: {}", dest.display()))?;
    serde_json::to_writer_pretty(file, report)
        .with_context(|| format!("Failed to serialize report to JSON: {}", dest.display()))?;
    Ok(())
}

fn print_report(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|()| stdout.flush())
        .with_context(|| "Failed to write report to standard output")
}
