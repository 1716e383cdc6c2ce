use super::{Summary, SummaryStyle};
use core::fmt::Display;

/// Numeric values the comparison engine can work with.
///
/// Implemented for the raw types inside `MetricValue`; providers comparing a
/// new unit only need this small seam.
pub trait MetricNumber: Copy + PartialOrd + PartialEq + Display {
    /// Lossy conversion for the machine-readable delta field.
    fn as_f64(self) -> f64;
}

impl MetricNumber for u64 {
    #[expect(clippy::cast_precision_loss, reason = "delta magnitudes are far below 2^52")]
    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl MetricNumber for f64 {
    fn as_f64(self) -> f64 {
        self
    }
}

/// Compare a current value against an optional prior value and render a
/// [`Summary`].
///
/// - With no prior value: `"{label}: {current}"`, neutral, no delta fields.
/// - With an equal prior value: `"{label}: {current} (no change)"`, neutral,
///   zero delta.
/// - Otherwise the direction of change combined with `increase_is_bad` picks
///   improved or worsened, and `delta` computes the magnitude from
///   `(prior, current)`.
pub fn compare<T, D>(label: &str, current: T, prior: Option<T>, increase_is_bad: bool, delta: D) -> Summary
where
    T: MetricNumber,
    D: Fn(T, T) -> T,
{
    let Some(prior) = prior else {
        return Summary::neutral(format!("{label}: {current}"));
    };

    if prior == current {
        return Summary {
            text: format!("{label}: {current} (no change)"),
            style: SummaryStyle::Neutral,
            numeric_value: Some(0.0),
            string_value: Some("no change".to_string()),
        };
    }

    let increased = current > prior;
    let style = if increased == increase_is_bad {
        SummaryStyle::Worsened
    } else {
        SummaryStyle::Improved
    };

    let magnitude = delta(prior, current);
    let sign = if increased { '+' } else { '-' };

    Summary {
        text: format!("{label}: {current} ({sign}{magnitude} from {prior})"),
        style,
        numeric_value: Some(magnitude.as_f64()),
        string_value: Some(format!("{sign}{magnitude}")),
    }
}
