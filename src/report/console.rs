// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Formats the report as plain text blocks, raw or human readable.

use std::fmt;

use super::format::{format_quantity, Quantity, Style, UnitFamily};
use super::{DisplayOptions, Layout, Report, ReportRow};

// SGR parameters of the colored output.
const COLOR_RESET: u8 = 0;
const COLOR_CODE: u8 = 31;
const COLOR_NAME: u8 = 0;
const COLOR_VALUE: u8 = 1;
const COLOR_TITLE: u8 = 32;

/// A named value of a report row.
pub(super) struct Field {
    pub(super) name: &'static str,
    pub(super) value: String,
}

/// The six fields printed for every row, formatted in `style`.
pub(super) fn fields(row: &ReportRow, style: Style) -> [Field; 6] {
    let counters = row.counters();
    [
        Field {
            name: "Type",
            value: row.type_label().to_string(),
        },
        Field {
            name: "Occurrence",
            value: format_quantity(
                Quantity::Whole(counters.occurrences),
                style,
                UnitFamily::Count,
                "req",
            ),
        },
        Field {
            name: "Size",
            value: format_quantity(
                Quantity::Whole(counters.size),
                style,
                UnitFamily::Bytes,
                "B",
            ),
        },
        Field {
            name: "Time",
            value: format_quantity(
                Quantity::Fractional(row.seconds()),
                style,
                UnitFamily::Elapsed,
                "",
            ),
        },
        Field {
            name: "Average speed",
            value: format_quantity(
                row.average_speed().into(),
                style,
                UnitFamily::Rate,
                "Bps",
            ),
        },
        Field {
            name: "Average request size",
            value: format_quantity(
                row.average_request_size().into(),
                style,
                UnitFamily::Rate,
                "Bpr",
            ),
        },
    ]
}

/// Display adapter writing a report as text blocks.
pub(super) struct ConsoleReport<'a> {
    report: &'a Report,
    options: &'a DisplayOptions,
}

impl<'a> ConsoleReport<'a> {
    pub(super) fn new(report: &'a Report, options: &'a DisplayOptions) -> Self {
        Self { report, options }
    }

    fn human(&self) -> bool {
        self.options.layout != Layout::Machine
    }

    fn style(&self) -> Style {
        if self.human() {
            Style::Human
        } else {
            Style::Raw
        }
    }

    fn color(&self, f: &mut fmt::Formatter<'_>, code: u8) -> fmt::Result {
        if self.options.color {
            write!(f, "\x1b[{code}m")?;
        }
        Ok(())
    }

    fn title(&self, f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
        if !self.human() {
            return Ok(());
        }
        self.color(f, COLOR_TITLE)?;
        write!(f, "[-{title}-]\n\n")?;
        self.color(f, COLOR_RESET)
    }

    fn row(&self, f: &mut fmt::Formatter<'_>, row: &ReportRow) -> fmt::Result {
        if !row.is_visible(self.options) {
            return Ok(());
        }
        let fields = fields(row, self.style());

        self.color(f, COLOR_CODE)?;
        if self.human() {
            writeln!(f, " {}", row.code())?;
        } else {
            write!(f, "{}", row.code())?;
        }
        self.color(f, COLOR_RESET)?;

        let width = fields
            .iter()
            .map(|field| field.name.len())
            .max()
            .unwrap_or(0)
            + 1;
        for field in &fields {
            if self.human() {
                self.color(f, COLOR_NAME)?;
                write!(f, "  {:<width$}: ", field.name)?;
                self.color(f, COLOR_RESET)?;
            } else {
                write!(f, " ")?;
            }
            self.color(f, COLOR_VALUE)?;
            write!(f, "{}", field.value)?;
            self.color(f, COLOR_RESET)?;
            if self.human() {
                writeln!(f)?;
            }
        }
        writeln!(f)
    }
}

impl fmt::Display for ConsoleReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.title(f, "RESULTS")?;
        for row in self.report.results() {
            self.row(f, row)?;
        }
        self.title(f, "SUM")?;
        for row in self.report.sums() {
            self.row(f, row)?;
        }
        Ok(())
    }
}
