//! Bar storage trait.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::Bar;
use crate::errors::Result;

/// Storage interface for daily bars.
///
/// Async methods are used for mutations; sync methods for point queries.
/// Every operation uses its own connection scope — implementations hold no
/// cross-call transaction state, which keeps concurrent pipeline runs safe.
#[async_trait]
pub trait BarStore: Send + Sync {
    /// Ensure the backing schema (bars and insights tables) exists.
    ///
    /// Safe to call repeatedly; a no-op once the schema is present. Errors
    /// here indicate the store itself is unreachable.
    fn ensure_schema(&self) -> Result<()>;

    /// Insert or overwrite the row for `(bar.symbol, bar.date)`.
    ///
    /// Atomic per call and idempotent under repeated identical input.
    async fn upsert_bar(&self, bar: &Bar) -> Result<()>;

    /// Point lookup by exact `(symbol, date)` key.
    fn get_bar(&self, symbol: &str, date: NaiveDate) -> Result<Option<Bar>>;
}
