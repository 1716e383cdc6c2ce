//! Shape helpers for the coverage report tree.

use crate::Result;
use crate::diag::Diag;
use camino::Utf8Path;
use ohno::{IntoAppError, app_err};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs;

/// Load and parse the coverage report.
pub fn load(path: &Utf8Path) -> Result<Value> {
    let text = fs::read_to_string(path).into_app_err_with(|| format!("reading coverage report '{path}'"))?;
    serde_json::from_str(&text).into_app_err_with(|| format!("parsing coverage report '{path}'"))
}

/// The target entries of a report. A report without a `targets` array is
/// treated as having no targets.
#[must_use]
pub fn targets(report: &Value) -> &[Value] {
    report.get("targets").and_then(Value::as_array).map_or(&[], Vec::as_slice)
}

/// The base name of a target: the portion of the raw name before the first
/// `.` separator ("App.app" has base name "App").
#[must_use]
pub fn base_name(raw_name: &str) -> &str {
    raw_name.split('.').next().unwrap_or(raw_name)
}

/// Walk the report's targets, applying the optional base-name filter.
///
/// Yields `(raw_name, entry)` for every included target. An absent filter
/// includes everything. Every entry must carry a string `name`, even entries
/// the filter would exclude; a missing or mistyped name aborts the walk.
///
/// # Errors
///
/// Returns a malformed-artifact error when a target entry has no string
/// `name` field.
pub fn included_targets<'a>(report: &'a Value, filter: Option<&BTreeSet<String>>, diag: &Diag) -> Result<Vec<(&'a str, &'a Value)>> {
    let mut included = Vec::new();

    for entry in targets(report) {
        let raw_name = entry
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| app_err!("malformed artifact: target entry is missing a string 'name' field"))?;

        diag.log_verbose(&format!("processing target {raw_name}"));

        if let Some(filter) = filter
            && !filter.contains(base_name(raw_name))
        {
            diag.log_verbose(&format!("skipping {raw_name}, not included in the configured targets"));
            continue;
        }

        included.push((raw_name, entry));
    }

    Ok(included)
}

/// Read a required numeric field from a target entry.
///
/// # Errors
///
/// Returns a malformed-artifact error when the field is absent or not a
/// non-negative integer.
pub fn count_field(entry: &Value, raw_name: &str, field: &str) -> Result<u64> {
    entry
        .get(field)
        .and_then(Value::as_u64)
        .ok_or_else(|| app_err!("malformed artifact: target '{raw_name}' is missing a numeric '{field}' field"))
}
