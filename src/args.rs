// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.
use clap::Parser;
use std::path::PathBuf;

use squid_stats::ingest::LineSource;
use squid_stats::report::{DisplayOptions, Layout};

const DEFAULT_CATALOG: &str = "/usr/local/share/squid_stats/default.srs";

#[derive(Parser)]
#[command(name = "squid_stats")]
#[command(version)]
#[command(about = "Summarizes Squid access logs by result code and result type")]
pub(crate) struct Args {
    /// Access log files to read. `-` reads standard input at that position.
    pub files: Vec<PathBuf>,

    /// Show human readable results.
    #[arg(short = 'H', long)]
    pub human: bool,

    /// Show human readable results as tables.
    #[arg(long, conflicts_with = "human")]
    pub table: bool,

    #[arg(
        short = 'S',
        long,
        env = "SQUID_STATS_CATALOG",
        default_value = DEFAULT_CATALOG,
        long_help = "Path to the catalog mapping result codes to result types.\n\
                Each line holds a result code and a type name separated by whitespace."
    )]
    pub srs: PathBuf,

    /// Use colors to show results.
    #[arg(short, long)]
    pub color: bool,

    /// Show empty stats too.
    #[arg(short, long)]
    pub empty: bool,

    /// Show unknown stats too.
    #[arg(short, long)]
    pub unknown: bool,

    /// Show progression.
    #[arg(short, long)]
    pub progress: bool,

    /// Read from standard input before the files.
    #[arg(short, long)]
    pub stdin: bool,

    /// Path to a file to write the full report to, in JSON format.
    #[arg(long)]
    pub json: Option<PathBuf>,
}

impl Args {
    /// Log sources in reading order.
    pub(crate) fn sources(&self) -> Vec<LineSource> {
        let stdin = self.stdin.then_some(LineSource::Stdin);
        stdin
            .into_iter()
            .chain(self.files.iter().cloned().map(LineSource::from))
            .collect()
    }

    pub(crate) fn display_options(&self) -> DisplayOptions {
        let layout = if self.table {
            Layout::Table
        } else if self.human {
            Layout::Human
        } else {
            Layout::Machine
        };
        DisplayOptions {
            layout,
            color: self.color,
            show_empty: self.empty,
            show_unknown: self.unknown,
        }
    }
}
