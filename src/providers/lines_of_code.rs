use super::{MetricProvider, MetricValue, decode_args};
use crate::Result;
use crate::artifact::{PipelineContext, coverage_report};
use crate::summary::{Summary, compare};
use ohno::app_err;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeSet;

/// Stable identifier, also the history key.
const IDENTIFIER: &str = "lines_of_code";

/// Arguments for the lines-of-code provider. An absent target filter
/// includes every target in the report.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct Args {
    targets: Option<BTreeSet<String>>,
}

/// Total executable line count across the report's targets.
///
/// Sums the `executableLines` field of every included target. More lines
/// means a larger codebase, which this provider treats as growth rather
/// than regression.
#[derive(Debug, Default)]
pub struct LinesOfCodeProvider;

impl MetricProvider for LinesOfCodeProvider {
    fn identifier(&self) -> &'static str {
        IDENTIFIER
    }

    fn description(&self) -> &'static str {
        "Executable lines of code"
    }

    fn check_args(&self, raw_args: Option<&Value>) -> Result<()> {
        let _ = decode_args::<Args>(IDENTIFIER, raw_args)?;
        Ok(())
    }

    fn extract(&self, ctx: &PipelineContext, raw_args: Option<&Value>) -> Result<MetricValue> {
        let args = decode_args::<Args>(IDENTIFIER, raw_args)?.unwrap_or_default();
        let report = ctx.coverage_report()?;

        let mut total = 0_u64;
        for (raw_name, entry) in coverage_report::included_targets(&report, args.targets.as_ref(), ctx.diag())? {
            total += coverage_report::count_field(entry, raw_name, "executableLines")?;
        }

        Ok(MetricValue::Count(total))
    }

    fn summary(&self, current: &MetricValue, prior: Option<&MetricValue>, _raw_args: Option<&Value>) -> Result<Summary> {
        let current = current
            .as_count()
            .ok_or_else(|| app_err!("provider '{IDENTIFIER}' produced a non-count value"))?;
        let prior = prior
            .map(|value| {
                value
                    .as_count()
                    .ok_or_else(|| app_err!("history entry for '{IDENTIFIER}' is not a count"))
            })
            .transpose()?;

        Ok(compare(self.description(), current, prior, false, |old, new| new.abs_diff(old)))
    }
}
