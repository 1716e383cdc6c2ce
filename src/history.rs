//! Recorded metric snapshots from past runs.
//!
//! The history file is an append-only JSON document holding one snapshot per
//! run. Each snapshot maps provider identifiers to the metric value that
//! provider extracted. Comparison only ever needs "the most recent recorded
//! value for identifier X", so lookups scan snapshots from newest to oldest.

use crate::Result;
use crate::providers::MetricValue;
use camino::Utf8Path;
use chrono::{DateTime, Utc};
use ohno::IntoAppError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;

/// One run's recorded metric values, keyed by provider identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub timestamp: DateTime<Utc>,
    pub values: BTreeMap<String, MetricValue>,
}

impl Snapshot {
    /// Create an empty snapshot stamped with the current time.
    #[must_use]
    pub fn now() -> Self {
        Self {
            timestamp: Utc::now(),
            values: BTreeMap::new(),
        }
    }
}

/// The full sequence of recorded snapshots, oldest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct History {
    #[serde(default)]
    pub snapshots: Vec<Snapshot>,
}

impl History {
    /// Load history from a JSON file. A missing file yields empty history.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e).into_app_err_with(|| format!("reading history file '{path}'")),
        };

        serde_json::from_str(&text).into_app_err_with(|| format!("parsing history file '{path}'"))
    }

    /// Save history to a JSON file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Utf8Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_str().is_empty()
        {
            fs::create_dir_all(parent).into_app_err_with(|| format!("creating history directory '{parent}'"))?;
        }

        let text = serde_json::to_string_pretty(self).into_app_err("serializing history")?;
        fs::write(path, text).into_app_err_with(|| format!("writing history file '{path}'"))?;
        Ok(())
    }

    /// The most recently recorded value for the given provider identifier.
    #[must_use]
    pub fn previous(&self, identifier: &str) -> Option<&MetricValue> {
        self.snapshots.iter().rev().find_map(|snapshot| snapshot.values.get(identifier))
    }

    /// Append a snapshot. Snapshots with no values are dropped so that a run
    /// where every provider failed does not pollute the record.
    pub fn append(&mut self, snapshot: Snapshot) {
        if !snapshot.values.is_empty() {
            self.snapshots.push(snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    fn snapshot_with(identifier: &str, value: MetricValue) -> Snapshot {
        let mut snapshot = Snapshot::now();
        let _ = snapshot.values.insert(identifier.to_string(), value);
        snapshot
    }

    #[test]
    fn test_previous_returns_most_recent() {
        let mut history = History::default();
        history.append(snapshot_with("lines_of_code", MetricValue::Count(100)));
        history.append(snapshot_with("lines_of_code", MetricValue::Count(150)));

        assert_eq!(history.previous("lines_of_code"), Some(&MetricValue::Count(150)));
    }

    #[test]
    fn test_previous_skips_snapshots_missing_the_identifier() {
        let mut history = History::default();
        history.append(snapshot_with("lines_of_code", MetricValue::Count(100)));
        history.append(snapshot_with("test_coverage", MetricValue::Percentage(80.0)));

        assert_eq!(history.previous("lines_of_code"), Some(&MetricValue::Count(100)));
    }

    #[test]
    fn test_previous_unknown_identifier() {
        let history = History::default();
        assert_eq!(history.previous("lines_of_code"), None);
    }

    #[test]
    fn test_empty_snapshots_are_dropped() {
        let mut history = History::default();
        history.append(Snapshot::now());
        assert!(history.snapshots.is_empty());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("missing.json")).unwrap();
        let history = History::load(&path).unwrap();
        assert!(history.snapshots.is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("nested/history.json")).unwrap();

        let mut history = History::default();
        history.append(snapshot_with("lines_of_code", MetricValue::Count(200)));
        history.save(&path).unwrap();

        let reloaded = History::load(&path).unwrap();
        assert_eq!(reloaded.previous("lines_of_code"), Some(&MetricValue::Count(200)));
    }

    #[test]
    fn test_load_rejects_garbage() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("history.json")).unwrap();
        std::fs::write(&path, "not json").unwrap();

        assert!(History::load(&path).is_err());
    }
}
