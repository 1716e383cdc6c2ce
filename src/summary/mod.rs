//! Comparison and summary rendering.
//!
//! Every provider's `summary` implementation goes through [`compare`], which
//! turns a current value, an optional prior value, a polarity flag, and a
//! provider-supplied delta function into a rendered [`Summary`]. Providers
//! customize only the label, the polarity, and the delta computation; the
//! rendering and style rules live here.

mod compare;
mod summary;

pub use compare::{MetricNumber, compare};
pub use summary::{Summary, SummaryStyle};
