//! Market data models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One trading day's price/volume record, as returned by a provider.
///
/// The symbol is not part of this struct — a provider is always queried for
/// a single symbol and the caller owns that association.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBar {
    /// Trading date (calendar date, no time component)
    pub date: NaiveDate,

    /// Opening price
    pub open: Decimal,

    /// High price
    pub high: Decimal,

    /// Low price
    pub low: Decimal,

    /// Closing price
    pub close: Decimal,

    /// Trading volume
    pub volume: i64,
}
