//! Insight storage trait.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::Insight;
use crate::errors::Result;

/// Storage interface for generated insights.
///
/// Same connection-per-call discipline as [`crate::bars::BarStore`].
#[async_trait]
pub trait InsightStore: Send + Sync {
    /// Insert or overwrite the row for `insight.date`.
    ///
    /// Atomic per call and idempotent under repeated identical input.
    async fn upsert_insight(&self, insight: &Insight) -> Result<()>;

    /// Point lookup by date.
    fn get_insight(&self, date: NaiveDate) -> Result<Option<Insight>>;
}
