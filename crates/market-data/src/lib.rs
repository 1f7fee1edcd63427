//! Market data fetching for tickerbrief.
//!
//! This crate provides the daily-bar side of the pipeline: a provider
//! abstraction ([`DailyBarProvider`]) plus the Alpha Vantage
//! implementation used in production.
//!
//! # Core Types
//!
//! - [`DailyBar`] - One trading day's OHLCV record
//! - [`DailyBarProvider`] - Trait implemented by quote providers
//! - [`MarketDataError`] - Closed set of fetch failure reasons
//!
//! A provider distinguishes three outcomes so callers never have to guess
//! from logs: `Ok(Some(bar))` (data), `Ok(None)` (provider answered but has
//! no series entries), and `Err(MarketDataError)` (transport or parse
//! failure).

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::DailyBar;
pub use provider::alpha_vantage::AlphaVantageProvider;
pub use provider::DailyBarProvider;
