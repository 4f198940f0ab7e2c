// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Report struct and public API for rendering accumulated statistics.

mod console;
mod format;
mod table;

pub use format::{format_quantity, Quantity, Style, UnitFamily};

use serde::Serialize;

use crate::catalog::Catalog;
use crate::registry::{Counters, Registry};

/// Label of the bucket collecting codes without a type, and of untyped rows.
pub const UNKNOWN: &str = "UNKNOWN";
/// Label of the grand total row.
pub const TOTAL: &str = "TOTAL";

/// How the report is laid out.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// One line per row, space separated raw values.
    #[default]
    Machine,
    /// Titled sections, one padded field per line.
    Human,
    /// Titled sections rendered as tables with human values.
    Table,
}

/// Display flags of a report.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    pub layout: Layout,
    pub color: bool,
    pub show_empty: bool,
    pub show_unknown: bool,
}

/// One line of the report: a result code, a type subtotal, or a summary bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    code: String,
    #[serde(rename = "type")]
    type_name: Option<String>,
    #[serde(flatten)]
    counters: Counters,
    average_speed: Option<f64>,
    average_request_size: Option<f64>,
    #[serde(skip)]
    summary: bool, // UNKNOWN and TOTAL are never hidden for lacking a type.
}

impl ReportRow {
    #[allow(clippy::cast_precision_loss)]
    fn new(code: &str, type_name: Option<&str>, counters: Counters, summary: bool) -> Self {
        let seconds = counters.elapsed_ms as f64 / 1000.0;
        Self {
            code: code.to_string(),
            type_name: type_name.map(str::to_string),
            counters,
            average_speed: (counters.elapsed_ms != 0)
                .then(|| counters.size as f64 / seconds),
            average_request_size: (counters.occurrences != 0)
                .then(|| counters.size as f64 / counters.occurrences as f64),
            summary,
        }
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Name of the type, `UNKNOWN` when there is none.
    #[must_use]
    pub fn type_label(&self) -> &str {
        self.type_name.as_deref().unwrap_or(UNKNOWN)
    }

    #[must_use]
    pub fn counters(&self) -> Counters {
        self.counters
    }

    /// Elapsed time in seconds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn seconds(&self) -> f64 {
        self.counters.elapsed_ms as f64 / 1000.0
    }

    /// Bytes per second, undefined without elapsed time.
    #[must_use]
    pub fn average_speed(&self) -> Option<f64> {
        self.average_speed
    }

    /// Bytes per request, undefined without requests.
    #[must_use]
    pub fn average_request_size(&self) -> Option<f64> {
        self.average_request_size
    }

    /// Whether the row is printed under `options`.
    #[must_use]
    pub fn is_visible(&self, options: &DisplayOptions) -> bool {
        let hidden_unknown = !options.show_unknown && self.type_name.is_none() && !self.summary;
        let hidden_empty = !options.show_empty && self.counters.is_empty();
        !(hidden_unknown || hidden_empty)
    }
}

/// Snapshot of a registry with per-type, unknown, and total sums.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    results: Vec<ReportRow>,
    types: Vec<ReportRow>,
    unknown: ReportRow,
    total: ReportRow,
}

impl Report {
    /// Build a report. Neither the registry nor the catalog is modified.
    ///
    /// # Panics
    /// Panics if the registry holds type references from another catalog.
    #[must_use]
    pub fn new(registry: &Registry, catalog: &Catalog) -> Self {
        let mut subtotals = vec![Counters::default(); catalog.types().len()];
        let mut unknown = Counters::default();
        let mut total = Counters::default();

        let results = registry
            .iter()
            .map(|stat| {
                let counters = stat.counters();
                match stat.kind() {
                    Some(kind) => subtotals[kind.index()] += counters,
                    None => unknown += counters,
                }
                total += counters;
                let type_name = stat.kind().map(|kind| catalog.result_type(kind).name());
                ReportRow::new(stat.code(), type_name, counters, false)
            })
            .collect();

        let types = catalog
            .types()
            .iter()
            .zip(subtotals)
            .map(|(result_type, counters)| {
                ReportRow::new(
                    result_type.name(),
                    Some(result_type.name()),
                    counters,
                    false,
                )
            })
            .collect();

        Self {
            results,
            types,
            unknown: ReportRow::new(UNKNOWN, None, unknown, true),
            total: ReportRow::new(TOTAL, None, total, true),
        }
    }

    /// Per-code rows, most recently created first.
    #[must_use]
    pub fn results(&self) -> &[ReportRow] {
        &self.results
    }

    /// Per-type subtotals in catalog declaration order.
    #[must_use]
    pub fn types(&self) -> &[ReportRow] {
        &self.types
    }

    #[must_use]
    pub fn unknown(&self) -> &ReportRow {
        &self.unknown
    }

    #[must_use]
    pub fn total(&self) -> &ReportRow {
        &self.total
    }

    /// Rows of the SUM section: type subtotals, then UNKNOWN, then TOTAL.
    pub fn sums(&self) -> impl Iterator<Item = &ReportRow> {
        self.types
            .iter()
            .chain(std::iter::once(&self.unknown))
            .chain(std::iter::once(&self.total))
    }

    /// Render the report as text.
    #[must_use]
    pub fn render(&self, options: &DisplayOptions) -> String {
        match options.layout {
            Layout::Machine | Layout::Human => {
                console::ConsoleReport::new(self, options).to_string()
            }
            Layout::Table => table::render(self, options),
        }
    }
}

/// Build a report from `registry` and `catalog` and render it.
#[must_use]
pub fn render(registry: &Registry, catalog: &Catalog, options: &DisplayOptions) -> String {
    Report::new(registry, catalog).render(options)
}
