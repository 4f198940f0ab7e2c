// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Loads the catalog mapping result codes to result types.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::classifier::classify_catalog_line;

/// Result type for catalog operations.
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

/// Errors that can occur while loading a catalog. All of them are fatal.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to open catalog: {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to read catalog: {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Parse error in {path:?} on line {line}: expected 2 fields, found {found}")]
    Parse {
        path: PathBuf,
        line: usize,
        found: usize,
    },
}

/// Index of a result type within its catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(usize);

impl TypeId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A category that one or more result codes roll up into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultType {
    name: String,
}

impl ResultType {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// One `<result-code> <type-name>` line of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub code: String,
    pub kind: TypeId,
    pub line: usize,
}

/// The result types and code mappings declared by a catalog file.
///
/// Types are kept in declaration order and are unique by name. Entries are kept in
/// file order and may repeat a code.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    types: Vec<ResultType>,
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Load a catalog from a file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or a line does not hold two fields.
    pub fn from_file<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| CatalogError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_reader(BufReader::new(file), path)
    }

    /// Load a catalog from any buffered reader. `path` is only used in error messages.
    ///
    /// # Errors
    /// Returns an error if reading fails or a line does not hold two fields.
    pub fn from_reader<R: BufRead>(reader: R, path: &Path) -> CatalogResult<Self> {
        let mut catalog = Self::default();
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| CatalogError::Read {
                path: path.to_path_buf(),
                source: e,
            })?;
            let number = index + 1;
            let (code, type_name) =
                classify_catalog_line(&line).map_err(|found| CatalogError::Parse {
                    path: path.to_path_buf(),
                    line: number,
                    found,
                })?;
            catalog.insert(code, type_name, number);
        }
        Ok(catalog)
    }

    fn insert(&mut self, code: &str, type_name: &str, line: usize) {
        // Catalogs are small, a linear scan keeps declaration order trivially.
        let kind = match self.types.iter().position(|t| t.name == type_name) {
            Some(index) => TypeId(index),
            None => {
                self.types.push(ResultType {
                    name: type_name.to_string(),
                });
                TypeId(self.types.len() - 1)
            }
        };
        if let Some(previous) = self.entries.iter().find(|e| e.code == code) {
            tracing::warn!(
                code,
                line,
                shadowed_line = previous.line,
                "Duplicate result code in catalog, the later line takes precedence"
            );
        }
        self.entries.push(CatalogEntry {
            code: code.to_string(),
            kind,
            line,
        });
    }

    /// Result types in declaration order.
    #[must_use]
    pub fn types(&self) -> &[ResultType] {
        &self.types
    }

    /// Code mappings in file order.
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Look up a result type.
    ///
    /// # Panics
    /// Panics if `id` was handed out by a different catalog with more types.
    #[must_use]
    pub fn result_type(&self, id: TypeId) -> &ResultType {
        &self.types[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::capture::capture_logs;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    fn load(content: &str) -> CatalogResult<Catalog> {
        Catalog::from_reader(Cursor::new(content), Path::new("test.srs"))
    }

    #[test]
    fn test_types_are_unique_and_ordered() {
        let catalog = load("TCP_MISS MISS\nTCP_HIT HIT\nTCP_MEM_HIT HIT\n").unwrap();
        let names: Vec<&str> = catalog.types().iter().map(ResultType::name).collect();
        assert_eq!(names, vec!["MISS", "HIT"]);
        assert_eq!(catalog.entries().len(), 3);
        assert_eq!(catalog.entries()[2].kind, catalog.entries()[1].kind);
    }

    #[test]
    fn test_duplicate_codes_are_kept() {
        let catalog = load("TCP_HIT HIT\nTCP_HIT MISS\n").unwrap();
        assert_eq!(catalog.types().len(), 2);
        assert_eq!(catalog.entries().len(), 2);
        assert_eq!(catalog.entries()[1].line, 2);
    }

    #[test]
    fn test_duplicate_code_is_reported() {
        let output = capture_logs(|| {
            load("TCP_HIT HIT\nTCP_MISS MISS\nTCP_HIT MISS\n").unwrap();
        });
        assert!(output.contains("Duplicate result code in catalog"));
        assert!(output.contains("code=\"TCP_HIT\""));
        assert!(output.contains("line=3"));
        assert!(output.contains("shadowed_line=1"));
    }

    #[test]
    fn test_unique_codes_are_not_reported() {
        let output = capture_logs(|| {
            load("TCP_HIT HIT\nTCP_MISS MISS\n").unwrap();
        });
        assert!(output.is_empty());
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = load("").unwrap();
        assert!(catalog.types().is_empty());
        assert!(catalog.entries().is_empty());
    }

    #[test]
    fn test_short_line_is_parse_error() {
        let err = load("TCP_HIT HIT\nTCP_MISS\n").unwrap_err();
        match err {
            CatalogError::Parse { line, found, .. } => {
                assert_eq!(line, 2);
                assert_eq!(found, 1);
            }
            other => panic!("Unexpected error: {other}"),
        }
    }

    #[test]
    fn test_blank_line_is_parse_error() {
        let err = load("TCP_HIT HIT\n\nTCP_MISS MISS\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
        match err {
            CatalogError::Parse { line, found, .. } => {
                assert_eq!(line, 2);
                assert_eq!(found, 0);
            }
            other => panic!("Unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "TCP_HIT\tHIT").unwrap();
        writeln!(file, "TCP_DENIED ERROR").unwrap();
        file.flush().unwrap();

        let catalog = Catalog::from_file(file.path()).unwrap();
        assert_eq!(catalog.entries()[0].code, "TCP_HIT");
        let denied = catalog.result_type(catalog.entries()[1].kind);
        assert_eq!(denied.name(), "ERROR");
    }

    #[test]
    fn test_file_not_found() {
        let result = Catalog::from_file("/nonexistent/default.srs");
        assert!(matches!(result, Err(CatalogError::Open { .. })));
        assert!(result
            .err()
            .unwrap()
            .to_string()
            .contains("Failed to open catalog"));
    }
}
