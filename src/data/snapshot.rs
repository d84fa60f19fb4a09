//! Bundled dataset snapshot.
//!
//! The site build writes the snapshot as a script assignment:
//!
//! ```text
//! window.__BLD_DATA__={"generatedAt":"...","lastUpdatedDisplay":"...","distros":[...]};
//! ```
//!
//! [`BundledSnapshot::parse`] accepts that form, the bare JSON object, or a bare
//! array of records.

use std::{fs, path::Path};

use rustc_hash::FxHashMap;
use serde::Deserialize;

use super::types::{DistroId, DistroRecord};

/// Global the build script assigns the snapshot to.
const SNAPSHOT_GLOBAL: &str = "window.__BLD_DATA__";

/// Dataset embedded at build time, used offline and for curated fields.
#[derive(Debug, Clone, Default)]
pub struct BundledSnapshot {
    pub generated_at: Option<String>,
    pub last_updated_display: Option<String>,
    records: Vec<DistroRecord>,
    index: FxHashMap<DistroId, usize>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotPayload {
    Wrapped {
        #[serde(default, rename = "generatedAt")]
        generated_at: Option<String>,
        #[serde(default, rename = "lastUpdatedDisplay")]
        last_updated_display: Option<String>,
        #[serde(default)]
        distros: Vec<DistroRecord>,
    },
    Bare(Vec<DistroRecord>),
}

impl BundledSnapshot {
    /// Build a snapshot from already-parsed records.
    pub fn from_records(records: Vec<DistroRecord>) -> Self {
        let index = records
            .iter()
            .enumerate()
            .map(|(i, record)| (record.id.clone(), i))
            .collect();
        Self {
            generated_at: None,
            last_updated_display: None,
            records,
            index,
        }
    }

    /// Parse the snapshot from its script or JSON text.
    pub fn parse(content: &str) -> serde_json::Result<Self> {
        let json = strip_script_wrapper(content);
        let snapshot = match serde_json::from_str(json)? {
            SnapshotPayload::Wrapped {
                generated_at,
                last_updated_display,
                distros,
            } => Self {
                generated_at,
                last_updated_display,
                ..Self::from_records(distros)
            },
            SnapshotPayload::Bare(records) => Self::from_records(records),
        };
        Ok(snapshot)
    }

    /// Load the snapshot from disk.
    ///
    /// A missing or unreadable file yields an empty snapshot: the bundled data is
    /// the last fallback and its absence is reported by the loader, not here.
    pub fn load(path: &Path) -> Self {
        let parsed = fs::read_to_string(path)
            .map_err(|err| err.to_string())
            .and_then(|content| Self::parse(&content).map_err(|err| err.to_string()));

        match parsed {
            Ok(snapshot) => {
                crate::debug!("load"; "bundled snapshot: {} records", snapshot.len());
                snapshot
            }
            Err(err) => {
                crate::debug!("load"; "bundled snapshot unavailable at {}: {err}", path.display());
                Self::default()
            }
        }
    }

    pub fn records(&self) -> &[DistroRecord] {
        &self.records
    }

    /// Look up the bundled record with the given id.
    pub fn get(&self, id: &str) -> Option<&DistroRecord> {
        self.index.get(id).map(|&i| &self.records[i])
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// Strip `window.__BLD_DATA__=` and the trailing `;` if present.
fn strip_script_wrapper(content: &str) -> &str {
    let trimmed = content.trim().trim_start_matches('\u{feff}');
    let Some(rest) = trimmed.strip_prefix(SNAPSHOT_GLOBAL) else {
        return trimmed;
    };
    rest.trim_start()
        .trim_start_matches('=')
        .trim()
        .trim_end_matches(';')
        .trim_end()
}
