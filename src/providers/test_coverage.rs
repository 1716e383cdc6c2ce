use super::{MetricProvider, MetricValue, decode_args};
use crate::Result;
use crate::artifact::{PipelineContext, coverage_report};
use crate::summary::{MetricNumber, Summary, compare};
use core::fmt;
use ohno::app_err;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeSet;

/// Stable identifier, also the history key.
const IDENTIFIER: &str = "test_coverage";

/// Arguments for the test-coverage provider. An absent target filter
/// includes every target in the report.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct Args {
    targets: Option<BTreeSet<String>>,
}

/// Aggregate line coverage percentage across the report's targets.
///
/// Sums `coveredLines` and `executableLines` over the included targets and
/// reports covered as a percentage of executable, rounded to two decimal
/// places. A report with no executable lines reports 0%.
#[derive(Debug, Default)]
pub struct TestCoverageProvider;

/// Round to two decimal places for stable, readable percentages.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percentage wrapper so comparison text carries the `%` unit.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
struct Percent(f64);

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl MetricNumber for Percent {
    fn as_f64(self) -> f64 {
        self.0
    }
}

impl MetricProvider for TestCoverageProvider {
    fn identifier(&self) -> &'static str {
        IDENTIFIER
    }

    fn description(&self) -> &'static str {
        "Test coverage"
    }

    fn check_args(&self, raw_args: Option<&Value>) -> Result<()> {
        let _ = decode_args::<Args>(IDENTIFIER, raw_args)?;
        Ok(())
    }

    fn extract(&self, ctx: &PipelineContext, raw_args: Option<&Value>) -> Result<MetricValue> {
        let args = decode_args::<Args>(IDENTIFIER, raw_args)?.unwrap_or_default();
        let report = ctx.coverage_report()?;

        let mut covered = 0_u64;
        let mut executable = 0_u64;
        for (raw_name, entry) in coverage_report::included_targets(&report, args.targets.as_ref(), ctx.diag())? {
            covered += coverage_report::count_field(entry, raw_name, "coveredLines")?;
            executable += coverage_report::count_field(entry, raw_name, "executableLines")?;
        }

        if executable == 0 {
            return Ok(MetricValue::Percentage(0.0));
        }

        #[expect(clippy::cast_precision_loss, reason = "line counts are far below 2^52")]
        let percentage = round2(covered as f64 / executable as f64 * 100.0);
        Ok(MetricValue::Percentage(percentage))
    }

    fn summary(&self, current: &MetricValue, prior: Option<&MetricValue>, _raw_args: Option<&Value>) -> Result<Summary> {
        let current = current
            .as_percentage()
            .ok_or_else(|| app_err!("provider '{IDENTIFIER}' produced a non-percentage value"))?;
        let prior = prior
            .map(|value| {
                value
                    .as_percentage()
                    .ok_or_else(|| app_err!("history entry for '{IDENTIFIER}' is not a percentage"))
            })
            .transpose()?;

        Ok(compare(self.description(), Percent(current), prior.map(Percent), false, |old, new| {
            Percent(round2((new.0 - old.0).abs()))
        }))
    }
}
