//! Per-mod outcome records and the run-wide update report.
//!
//! Every archive and every discovered dependency ends up with exactly one
//! record, whatever happened to it. Records are keyed by resolved identity,
//! or by filename when identification failed, and keep insertion order for
//! reporting.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Terminal and intermediate states of a single mod during a run.
///
/// `Queued` is the only non-terminal state; `NotFound` is reachable both
/// for never-identified archives and for queued identities whose version
/// listing could not be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeStatus {
    /// Waiting in the resolution queue
    Queued,
    /// A compatible version was downloaded into the mods directory
    Updated,
    /// Dry-run: a compatible version exists and would have been downloaded
    WouldUpdate,
    /// No version matches the compatibility target (or the apply step failed)
    NoUpdate,
    /// The mod could not be identified or its registry data is unreachable
    NotFound,
}

impl OutcomeStatus {
    /// Human-readable label used in the summary table
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeStatus::Queued => "Queued",
            OutcomeStatus::Updated => "Updated",
            OutcomeStatus::WouldUpdate => "Would Update",
            OutcomeStatus::NoUpdate => "No Update",
            OutcomeStatus::NotFound => "Not Found",
        }
    }

    /// Whether this state ends a mod's participation in the run
    pub fn is_terminal(&self) -> bool {
        !matches!(self, OutcomeStatus::Queued)
    }
}

impl std::fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result row for a single mod
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    /// Display title (falls back to the identity or filename)
    pub title: String,
    /// Current state
    pub status: OutcomeStatus,
    /// Chosen version number once one is selected
    pub version: Option<String>,
}

impl OutcomeRecord {
    /// Version column text: the chosen number, `---` while queued, `N/A` otherwise
    pub fn version_display(&self) -> &str {
        match (&self.version, self.status) {
            (Some(version), _) => version,
            (None, OutcomeStatus::Queued) => "---",
            (None, _) => "N/A",
        }
    }
}

/// Insertion-ordered collection of outcome records, keyed by identity or
/// filename. The sole externally meaningful output of a run.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateReport {
    records: IndexMap<String, OutcomeRecord>,
}

impl UpdateReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a freshly-enqueued identity
    pub fn insert_queued(&mut self, key: impl Into<String>, title: impl Into<String>) {
        self.records.insert(
            key.into(),
            OutcomeRecord {
                title: title.into(),
                status: OutcomeStatus::Queued,
                version: None,
            },
        );
    }

    /// Record an archive that never resolved to an identity, keyed by filename
    pub fn insert_not_found(&mut self, filename: impl Into<String>) {
        let filename = filename.into();
        self.records.insert(
            filename.clone(),
            OutcomeRecord {
                title: filename,
                status: OutcomeStatus::NotFound,
                version: None,
            },
        );
    }

    /// Move an existing record to a terminal state
    pub fn resolve(&mut self, key: &str, status: OutcomeStatus, version: Option<String>) {
        if let Some(record) = self.records.get_mut(key) {
            record.status = status;
            record.version = version;
        }
    }

    /// Look up a record by identity or filename
    pub fn get(&self, key: &str) -> Option<&OutcomeRecord> {
        self.records.get(key)
    }

    /// Records in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OutcomeRecord)> {
        self.records.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the report has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether every record has reached a terminal state
    pub fn is_settled(&self) -> bool {
        self.records.values().all(|r| r.status.is_terminal())
    }
}
