// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Per-result-code accumulators.
//!
//! The registry keeps one [`Stat`] per result code seen in the catalog or the logs.
//! Stats are listed newest first. When the catalog declares a code twice, the later
//! declaration is the one log lines are accounted to.

use serde::Serialize;
use std::collections::HashMap;
use std::ops::{Add, AddAssign};

use crate::catalog::{Catalog, TypeId};

/// Running sums of one accumulator. Sums wrap instead of overflowing.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Counters {
    pub occurrences: u64,
    pub size: u64,
    pub elapsed_ms: u64,
}

impl Counters {
    /// Account one request.
    pub fn record(&mut self, size: u64, elapsed_ms: u64) {
        self.occurrences = self.occurrences.wrapping_add(1);
        self.size = self.size.wrapping_add(size);
        self.elapsed_ms = self.elapsed_ms.wrapping_add(elapsed_ms);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occurrences == 0
    }
}

impl Add for Counters {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            occurrences: self.occurrences.wrapping_add(other.occurrences),
            size: self.size.wrapping_add(other.size),
            elapsed_ms: self.elapsed_ms.wrapping_add(other.elapsed_ms),
        }
    }
}

impl AddAssign for Counters {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

/// Accumulator for one result code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
    code: String,
    counters: Counters,
    kind: Option<TypeId>, // None for codes the catalog does not know.
}

impl Stat {
    #[must_use]
    pub fn new(code: impl Into<String>, kind: Option<TypeId>) -> Self {
        Self {
            code: code.into(),
            counters: Counters::default(),
            kind,
        }
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub fn counters(&self) -> Counters {
        self.counters
    }

    #[must_use]
    pub fn kind(&self) -> Option<TypeId> {
        self.kind
    }

    /// Account one request to this code.
    pub fn record(&mut self, size: u64, elapsed_ms: u64) {
        self.counters.record(size, elapsed_ms);
    }
}

/// All accumulators of a run, indexed by result code.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    // Creation order. Iteration walks it backwards.
    stats: Vec<Stat>,
    // Code to the most recently created stat carrying it.
    index: HashMap<String, usize>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create one zeroed stat per catalog entry, bound to the entry's type.
    #[must_use]
    pub fn seeded(catalog: &Catalog) -> Self {
        let mut registry = Self::new();
        for entry in catalog.entries() {
            registry.insert(&entry.code, Some(entry.kind));
        }
        registry
    }

    fn insert(&mut self, code: &str, kind: Option<TypeId>) -> usize {
        let position = self.stats.len();
        self.stats.push(Stat::new(code, kind));
        self.index.insert(code.to_string(), position);
        position
    }

    /// Get the stat for `code`, creating an untyped one if the code was never seen.
    pub fn find_or_create(&mut self, code: &str) -> &mut Stat {
        let position = match self.index.get(code) {
            Some(&position) => position,
            None => self.insert(code, None),
        };
        &mut self.stats[position]
    }

    /// Account one request to `code`.
    pub fn record(&mut self, code: &str, size: u64, elapsed_ms: u64) {
        self.find_or_create(code).record(size, elapsed_ms);
    }

    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Stat> {
        self.index.get(code).map(|&position| &self.stats[position])
    }

    /// Stats, most recently created first.
    pub fn iter(&self) -> impl Iterator<Item = &Stat> {
        self.stats.iter().rev()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}
