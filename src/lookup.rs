use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::codes::GroupCode;

/// One row of the correlation table: `Q, Group, ai, bi, ci, di`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupEntry {
    pub q: GroupCode,
    pub group: String,
    pub ai: f64,
    pub bi: f64,
    pub ci: f64,
    pub di: f64,
}

impl GroupEntry {
    pub fn coefficients(&self) -> [f64; 4] {
        [self.ai, self.bi, self.ci, self.di]
    }
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
}

/// Outcome of looking up one code. A miss is a value, not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    Found(&'a GroupEntry),
    Missing(GroupCode),
}

impl Lookup<'_> {
    pub fn code(&self) -> GroupCode {
        match self {
            Lookup::Found(entry) => entry.q,
            Lookup::Missing(code) => *code,
        }
    }

    pub fn entry(&self) -> Option<&GroupEntry> {
        match self {
            Lookup::Found(entry) => Some(entry),
            Lookup::Missing(_) => None,
        }
    }
}

/// A code from a classification paired with its table row, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedGroup {
    pub code: GroupCode,
    pub entry: Option<GroupEntry>,
}

impl ResolvedGroup {
    pub fn is_resolved(&self) -> bool {
        self.entry.is_some()
    }
}

impl fmt::Display for ResolvedGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.entry {
            Some(e) => write!(
                f,
                "{}  {}  {} {} {} {}",
                self.code, e.group, e.ai, e.bi, e.ci, e.di
            ),
            None => write!(f, "{}  unresolved", self.code),
        }
    }
}

/// Group-contribution coefficients keyed by group code.
///
/// Loaded once and read-only afterwards, so it can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct GroupTable {
    entries: BTreeMap<GroupCode, GroupEntry>,
}

impl GroupTable {
    pub fn from_path(path: &Path) -> Result<Self, TableError> {
        let label = path.to_string_lossy().to_string();
        let file = std::fs::File::open(path).map_err(|e| TableError::Io {
            path: label.clone(),
            source: e,
        })?;
        Self::from_reader(file, &label)
    }

    /// Reads a table with a header row. Columns are taken by position, so
    /// the header text itself is not checked.
    pub fn from_reader<R: Read>(reader: R, label: &str) -> Result<Self, TableError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut entries = BTreeMap::new();
        for result in reader.records() {
            let entry: GroupEntry = result
                .and_then(|record| record.deserialize(None))
                .map_err(|e| TableError::Csv {
                    path: label.to_string(),
                    source: e,
                })?;
            if let Some(previous) = entries.insert(entry.q, entry) {
                warn!(
                    code = %previous.q,
                    path = label,
                    "duplicate group code, keeping the later row"
                );
            }
        }
        debug!(rows = entries.len(), path = label, "group table loaded");
        Ok(Self { entries })
    }

    pub fn from_entries(entries: impl IntoIterator<Item = GroupEntry>) -> Self {
        Self {
            entries: entries.into_iter().map(|e| (e.q, e)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn lookup(&self, code: GroupCode) -> Lookup<'_> {
        match self.entries.get(&code) {
            Some(entry) => Lookup::Found(entry),
            None => Lookup::Missing(code),
        }
    }

    /// Looks up every code in order; misses stay in place as unresolved.
    pub fn resolve_all(&self, codes: &[GroupCode]) -> Vec<ResolvedGroup> {
        codes
            .iter()
            .map(|&code| {
                let entry = self.lookup(code).entry().cloned();
                if entry.is_none() {
                    warn!(%code, "group code missing from table");
                }
                ResolvedGroup { code, entry }
            })
            .collect()
    }
}
