// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Byte counters of the ingestion phase, optionally shown as a progress bar.

use indicatif::{ProgressBar, ProgressStyle};

const TEMPLATE: &str = "{spinner} [{elapsed_precise}] {wide_bar} {bytes}/{total_bytes} ({eta})";

/// Tracks how many input bytes have been consumed.
pub struct Progress {
    done: u64,
    total: u64,
    bar: Option<ProgressBar>,
}

impl Progress {
    /// Counters only, nothing is drawn.
    #[must_use]
    pub fn hidden(total: u64) -> Self {
        Self {
            done: 0,
            total,
            bar: None,
        }
    }

    /// Counters drawn as a progress bar on standard error.
    #[must_use]
    pub fn with_bar(total: u64) -> Self {
        let bar = ProgressBar::new(total);
        match ProgressStyle::with_template(TEMPLATE) {
            Ok(style) => bar.set_style(style),
            Err(e) => tracing::debug!(error = %e, "Falling back to the default progress style"),
        }
        Self {
            done: 0,
            total,
            bar: Some(bar),
        }
    }

    /// Account `bytes` consumed input bytes.
    pub fn advance(&mut self, bytes: u64) {
        self.done = self.done.saturating_add(bytes);
        if let Some(bar) = &self.bar {
            bar.inc(bytes);
        }
    }

    #[must_use]
    pub fn done(&self) -> u64 {
        self.done
    }

    /// Sum of the sizes of all input files. Standard input is not included.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Run `f` with the progress bar hidden, so that it can write to the terminal.
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        match &self.bar {
            Some(bar) => bar.suspend(f),
            None => f(),
        }
    }

    /// Remove the progress bar, if any.
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}
