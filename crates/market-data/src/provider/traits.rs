//! Market data provider trait definitions.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::DailyBar;

/// Trait for daily market data providers.
///
/// Implement this trait to add support for a new market data source.
#[async_trait]
pub trait DailyBarProvider: Send + Sync {
    /// Fetch the most recent daily bar for `symbol`.
    ///
    /// Returns `Ok(None)` when the provider answered successfully but the
    /// series contains no entries. Transport and parse failures are
    /// returned as [`MarketDataError`]s; implementations never panic on a
    /// malformed payload.
    async fn latest_daily_bar(&self, symbol: &str) -> Result<Option<DailyBar>, MarketDataError>;
}
