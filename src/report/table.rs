// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Formats the report as bordered tables.

use comfy_table::{Attribute, Cell, CellAlignment, Color, Table};

use super::console::fields;
use super::format::Style;
use super::{DisplayOptions, Report, ReportRow};

const HEADER: [&str; 7] = [
    "Result",
    "Type",
    "Occurrence",
    "Size",
    "Time",
    "Average speed",
    "Average request size",
];

/// Render both report sections as tables.
pub(super) fn render(report: &Report, options: &DisplayOptions) -> String {
    let results = section_table(report.results().iter(), options);
    let sums = section_table(report.sums(), options);
    format!(
        "{}\n{results}\n\n{}\n{sums}\n",
        title("RESULTS", options),
        title("SUM", options)
    )
}

fn title(title: &str, options: &DisplayOptions) -> String {
    let mut cell = Cell::new(title);
    if options.color {
        cell = cell.fg(Color::Green).add_attribute(Attribute::Bold);
    }
    let mut table = Table::new();
    table
        .load_preset(comfy_table::presets::NOTHING)
        .add_row(vec![cell]);
    if options.color {
        table.enforce_styling();
    }
    table.to_string()
}

/// Create a table with the default preset styling.
fn default_table_preset(options: &DisplayOptions) -> Table {
    let mut table = Table::new();
    table
        .load_preset(comfy_table::presets::UTF8_FULL_CONDENSED)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS)
        .set_content_arrangement(comfy_table::ContentArrangement::Dynamic);
    if options.color {
        table.enforce_styling();
    } else {
        table.force_no_tty();
    }
    table
}

fn section_table<'a>(rows: impl Iterator<Item = &'a ReportRow>, options: &DisplayOptions) -> Table {
    let mut table = default_table_preset(options);
    table.set_header(
        HEADER
            .iter()
            .map(|name| Cell::new(name).add_attribute(Attribute::Bold)),
    );
    for row in rows.filter(|row| row.is_visible(options)) {
        let mut code = Cell::new(row.code());
        if options.color {
            code = code.fg(Color::Red);
        }
        let values = fields(row, Style::Human)
            .map(|field| Cell::new(field.value).set_alignment(CellAlignment::Right));
        table.add_row(std::iter::once(code).chain(values));
    }
    table
}
