//! Metric providers and the registry that runs them.
//!
//! A provider knows how to pull one metric out of the build artifact and how
//! to compare two values of that metric. The registry maps stable string
//! identifiers to providers, runs a configured plan against the artifact, and
//! records per-provider failures without aborting the rest of the run.

mod lines_of_code;
mod outcome;
mod provider;
mod registry;
mod test_coverage;

pub use lines_of_code::LinesOfCodeProvider;
pub use outcome::{ProviderOutcome, ProviderRun};
pub use provider::{MetricProvider, MetricValue, decode_args};
pub use registry::{PlanEntry, Registry};
pub use test_coverage::TestCoverageProvider;
