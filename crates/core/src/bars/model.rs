use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tickerbrief_market_data::DailyBar;

/// One trading day's OHLCV record for a symbol.
///
/// At most one `Bar` exists per (symbol, date) in the store; re-ingestion
/// of the same key overwrites prior values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    /// Ticker symbol (e.g. "IBM")
    pub symbol: String,

    /// Trading date
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

impl Bar {
    /// Associate a provider bar with its symbol.
    pub fn from_daily(symbol: &str, daily: DailyBar) -> Self {
        Self {
            symbol: symbol.to_string(),
            date: daily.date,
            open: daily.open,
            high: daily.high,
            low: daily.low,
            close: daily.close,
            volume: daily.volume,
        }
    }
}
