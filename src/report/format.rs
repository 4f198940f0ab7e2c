// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Renders quantities either raw or scaled with a unit prefix.

/// How a value is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Plain numbers, no scaling and no unit.
    Raw,
    /// Scaled by magnitude, one fractional digit, prefixed unit.
    Human,
}

/// Unit tables used for human scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitFamily {
    /// Whole counts such as requests.
    Count,
    /// Whole byte counts.
    Bytes,
    /// Elapsed seconds, scaled up to years.
    Elapsed,
    /// Derived averages such as bytes per second.
    Rate,
}

/// A value to render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Quantity {
    Whole(u64),
    Fractional(f64),
    /// An average over nothing. Rendered as `-1.0`.
    Undefined,
}

impl From<Option<f64>> for Quantity {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Undefined, Self::Fractional)
    }
}

struct Prefix {
    label: &'static str,
    threshold: u64,
}

const METRIC: &[Prefix] = &[
    Prefix {
        label: "",
        threshold: 1,
    },
    Prefix {
        label: "K",
        threshold: 1_000,
    },
    Prefix {
        label: "M",
        threshold: 1_000_000,
    },
    Prefix {
        label: "G",
        threshold: 1_000_000_000,
    },
    Prefix {
        label: "T",
        threshold: 1_000_000_000_000,
    },
];

const ELAPSED: &[Prefix] = &[
    Prefix {
        label: "seconds",
        threshold: 1,
    },
    Prefix {
        label: "minutes",
        threshold: 60,
    },
    Prefix {
        label: "hours",
        threshold: 3_600,
    },
    Prefix {
        label: "days",
        threshold: 86_400,
    },
    Prefix {
        label: "weeks",
        threshold: 604_800,
    },
    Prefix {
        label: "months",
        threshold: 2_592_000,
    },
    Prefix {
        label: "years",
        threshold: 31_536_000,
    },
];

/// Sentinel printed for undefined averages.
const UNDEFINED: f64 = -1.0;

impl UnitFamily {
    fn prefixes(self) -> &'static [Prefix] {
        match self {
            Self::Count | Self::Bytes | Self::Rate => METRIC,
            Self::Elapsed => ELAPSED,
        }
    }

    /// Whole quantities below the first scaled threshold are printed without decimals.
    fn keeps_small_integers(self) -> bool {
        matches!(self, Self::Count | Self::Bytes)
    }
}

/// Render `quantity` in `style`. `unit` is appended after the prefix in human style.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_quantity(quantity: Quantity, style: Style, family: UnitFamily, unit: &str) -> String {
    match (style, quantity) {
        (Style::Raw, Quantity::Whole(value)) => value.to_string(),
        (Style::Raw, Quantity::Fractional(value)) => raw_float(value),
        (Style::Raw, Quantity::Undefined) => raw_float(UNDEFINED),
        (Style::Human, Quantity::Whole(value))
            if family.keeps_small_integers() && value < METRIC[1].threshold =>
        {
            format!("{value} {unit}")
        }
        (Style::Human, Quantity::Whole(value)) => scaled(value as f64, family, unit),
        (Style::Human, Quantity::Fractional(value)) => scaled(value, family, unit),
        (Style::Human, Quantity::Undefined) => scaled(UNDEFINED, family, unit),
    }
}

/// Pick the largest prefix whose threshold does not exceed `value`.
///
/// Negative values land on the first, unscaled, prefix.
#[allow(clippy::cast_precision_loss)]
fn scaled(value: f64, family: UnitFamily, unit: &str) -> String {
    let prefixes = family.prefixes();
    let prefix = prefixes
        .iter()
        .rev()
        .find(|prefix| value >= prefix.threshold as f64)
        .unwrap_or(&prefixes[0]);
    format!(
        "{:.1} {}{}",
        value / prefix.threshold as f64,
        prefix.label,
        unit
    )
}

/// Shortest representation that still reads as a float, `750.0` rather than `750`.
fn raw_float(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{text}.0")
    } else {
        text
    }
}
