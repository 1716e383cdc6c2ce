use crate::Result;
use crate::providers::ProviderRun;
use chrono::{DateTime, Utc};
use core::fmt::Write;
use serde_json::json;

pub fn generate<W: Write>(runs: &[ProviderRun], generated_at: DateTime<Utc>, writer: &mut W) -> Result<()> {
    let output = json!({
        "generated_at": generated_at.to_rfc3339(),
        "results": runs,
    });

    write!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}
