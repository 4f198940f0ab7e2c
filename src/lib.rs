// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! A tool for summarizing Squid access logs by result code.
//!
//! This crate provides functionality to:
//! - Load a catalog mapping result codes (`TCP_HIT`, `TCP_MISS`, ...) to result types
//! - Classify access-log lines and accumulate requests, bytes and elapsed time per code
//! - Sum the accumulators per type, for unknown codes, and in total
//! - Render the results raw, human readable, or as tables

pub mod catalog;
pub mod classifier;
pub mod ingest;
pub mod logging;
pub mod registry;
pub mod report;

// Re-export key types for convenience
pub use catalog::{Catalog, CatalogError, ResultType};
pub use ingest::{IngestError, IngestSummary, LineSource, Progress};
pub use registry::{Counters, Registry, Stat};
pub use report::{DisplayOptions, Layout, Report};
