use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day's generated analysis for a symbol.
///
/// `date` is the unique key across the whole store — under the
/// single-symbol scope only one insight may exist per calendar date, and
/// regeneration overwrites symbol/summary/recommendations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    /// Date of the analyzed bar (unique key)
    pub date: NaiveDate,

    /// Ticker symbol the insight was generated for
    pub symbol: String,

    /// First line of the model output
    pub summary: String,

    /// Remainder of the model output, one or more action items
    pub recommendations: String,
}
