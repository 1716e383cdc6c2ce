use serde::Serialize;

/// Qualitative tag attached to a rendered comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SummaryStyle {
    /// The metric moved in the direction the provider considers good.
    Improved,

    /// The metric moved in the direction the provider considers bad.
    Worsened,

    /// No prior value, or no change.
    Neutral,
}

/// The rendered comparison of a current and prior metric value.
///
/// The delta fields are populated if and only if a prior value was available;
/// with no prior value the summary still renders the current value with
/// neutral style.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Human-readable one-line rendering.
    pub text: String,

    /// Qualitative style of the change.
    pub style: SummaryStyle,

    /// Numeric delta magnitude, for machine consumption.
    pub numeric_value: Option<f64>,

    /// Textual delta (signed, or "no change").
    pub string_value: Option<String>,
}

impl Summary {
    /// A neutral summary with no delta fields.
    #[must_use]
    pub const fn neutral(text: String) -> Self {
        Self {
            text,
            style: SummaryStyle::Neutral,
            numeric_value: None,
            string_value: None,
        }
    }
}
