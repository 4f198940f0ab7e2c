// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Streams access-log sources through the classifier into the registry.

mod progress;

pub use progress::Progress;

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::classifier::classify_log_line;
use crate::registry::Registry;

/// Result type for ingestion.
pub type IngestResult<T> = std::result::Result<T, IngestError>;

/// Errors that abort ingestion. Malformed lines are not among them.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to stat log file: {path:?}")]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to open log file: {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to read from {source_name}")]
    Read {
        source_name: String,
        #[source]
        source: io::Error,
    },
}

/// Where log lines come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineSource {
    Stdin,
    File(PathBuf),
}

impl From<PathBuf> for LineSource {
    /// `-` names standard input.
    fn from(path: PathBuf) -> Self {
        if path.as_os_str() == "-" {
            Self::Stdin
        } else {
            Self::File(path)
        }
    }
}

impl fmt::Display for LineSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => write!(f, "stdin"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Line counts of an ingestion run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestSummary {
    /// Lines read.
    pub lines: usize,
    /// Lines accounted to a result code.
    pub records: usize,
    /// Malformed lines that were skipped.
    pub skipped: usize,
}

impl std::ops::AddAssign for IngestSummary {
    fn add_assign(&mut self, other: Self) {
        self.lines += other.lines;
        self.records += other.records;
        self.skipped += other.skipped;
    }
}

/// Total size of the file sources, in bytes.
///
/// # Errors
/// Returns an error if a file cannot be stat'ed.
pub fn total_size(sources: &[LineSource]) -> IngestResult<u64> {
    sources.iter().try_fold(0u64, |total, source| match source {
        LineSource::Stdin => Ok(total),
        LineSource::File(path) => fs::metadata(path)
            .map(|metadata| total.saturating_add(metadata.len()))
            .map_err(|e| IngestError::Stat {
                path: path.clone(),
                source: e,
            }),
    })
}

/// Read every source in order and account its lines to `registry`.
///
/// # Errors
/// Returns an error if a source cannot be opened or read.
pub fn ingest(
    registry: &mut Registry,
    sources: &[LineSource],
    progress: &mut Progress,
) -> IngestResult<IngestSummary> {
    let mut summary = IngestSummary::default();
    for source in sources {
        tracing::info!(source = %source, "Reading log lines");
        summary += match source {
            LineSource::Stdin => {
                ingest_reader(registry, io::stdin().lock(), &source.to_string(), progress)?
            }
            LineSource::File(path) => ingest_file(registry, path, progress)?,
        };
    }
    progress.finish();
    tracing::info!(
        lines = summary.lines,
        records = summary.records,
        skipped = summary.skipped,
        "Ingestion completed"
    );
    Ok(summary)
}

fn ingest_file(
    registry: &mut Registry,
    path: &Path,
    progress: &mut Progress,
) -> IngestResult<IngestSummary> {
    let file = File::open(path).map_err(|e| IngestError::Open {
        path: path.to_path_buf(),
        source: e,
    })?;
    ingest_reader(
        registry,
        BufReader::new(file),
        &path.display().to_string(),
        progress,
    )
}

/// Account every line of `reader` to `registry`.
///
/// Malformed lines are reported with their source name and line number and skipped.
/// Invalid UTF-8 is replaced rather than rejected.
///
/// # Errors
/// Returns an error if reading fails.
pub fn ingest_reader<R: BufRead>(
    registry: &mut Registry,
    mut reader: R,
    source_name: &str,
    progress: &mut Progress,
) -> IngestResult<IngestSummary> {
    let mut summary = IngestSummary::default();
    let mut buffer = Vec::new();
    loop {
        buffer.clear();
        let read = reader
            .read_until(b'\n', &mut buffer)
            .map_err(|e| IngestError::Read {
                source_name: source_name.to_string(),
                source: e,
            })?;
        if read == 0 {
            break;
        }
        progress.advance(read as u64);
        summary.lines += 1;

        let line = String::from_utf8_lossy(&buffer);
        let line = line.trim_end_matches(&['\n', '\r'][..]);
        match classify_log_line(line) {
            Ok(record) => {
                registry.record(record.code, record.size, record.elapsed_ms);
                summary.records += 1;
            }
            Err(e) => {
                let number = summary.lines;
                progress.suspend(|| {
                    tracing::warn!(
                        source = source_name,
                        line = number,
                        error = %e,
                        "Skipping malformed log line"
                    );
                });
                summary.skipped += 1;
            }
        }
    }
    Ok(summary)
}
