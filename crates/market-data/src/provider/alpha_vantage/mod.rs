//! Alpha Vantage market data provider implementation.
//!
//! Fetches equity daily bars via the TIME_SERIES_DAILY endpoint.
//!
//! Alpha Vantage returns the series newest-first; the first entry is taken
//! as the latest bar. That ordering is part of the upstream contract, so
//! the response is deserialized into an order-preserving map and never
//! re-sorted. Note: the free tier is limited to 5 API calls per minute.

use async_trait::async_trait;
use chrono::NaiveDate;
use indexmap::IndexMap;
use log::{debug, warn};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::MarketDataError;
use crate::models::DailyBar;
use crate::provider::DailyBarProvider;

const BASE_URL: &str = "https://www.alphavantage.co/query";
const PROVIDER_ID: &str = "ALPHA_VANTAGE";

/// Alpha Vantage daily bar provider.
pub struct AlphaVantageProvider {
    client: Client,
    api_key: String,
}

// ============================================================================
// Response structures for Alpha Vantage API
// ============================================================================

/// TIME_SERIES_DAILY response for equities.
///
/// `time_series` is an `IndexMap` so the provider's newest-first document
/// order survives deserialization.
#[derive(Debug, Deserialize)]
struct TimeSeriesResponse {
    #[serde(rename = "Time Series (Daily)")]
    time_series: Option<IndexMap<String, DailyQuote>>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DailyQuote {
    #[serde(rename = "1. open")]
    open: String,
    #[serde(rename = "2. high")]
    high: String,
    #[serde(rename = "3. low")]
    low: String,
    #[serde(rename = "4. close")]
    close: String,
    #[serde(rename = "5. volume")]
    volume: String,
}

// ============================================================================
// AlphaVantageProvider implementation
// ============================================================================

impl AlphaVantageProvider {
    /// Create a new Alpha Vantage provider with the given API key.
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, api_key }
    }

    /// Make a request to the Alpha Vantage API.
    async fn fetch(&self, params: &[(&str, &str)]) -> Result<String, MarketDataError> {
        let mut all_params: Vec<(&str, &str)> = params.to_vec();
        all_params.push(("apikey", &self.api_key));

        let url = reqwest::Url::parse_with_params(BASE_URL, &all_params).map_err(|e| {
            MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to build URL: {}", e),
            }
        })?;

        debug!(
            "Alpha Vantage request: {}",
            url.as_str().replace(&self.api_key, "***")
        );

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if !status.is_success() {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        response
            .text()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            })
    }

    /// Check for API-level errors in the response.
    fn check_api_error(
        error_message: &Option<String>,
        note: &Option<String>,
        information: &Option<String>,
    ) -> Result<(), MarketDataError> {
        if let Some(ref msg) = error_message {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: msg.clone(),
            });
        }

        // "Note" usually indicates rate limiting
        if let Some(ref msg) = note {
            if msg.contains("API call frequency") || msg.contains("rate limit") {
                return Err(MarketDataError::RateLimited {
                    provider: PROVIDER_ID.to_string(),
                });
            }
            warn!("Alpha Vantage note: {}", msg);
        }

        // "Information" can indicate various issues
        if let Some(ref msg) = information {
            if msg.contains("API call frequency") || msg.contains("rate limit") {
                return Err(MarketDataError::RateLimited {
                    provider: PROVIDER_ID.to_string(),
                });
            }
            warn!("Alpha Vantage info: {}", msg);
        }

        Ok(())
    }

    /// Parse a decimal price field.
    fn parse_decimal(field: &str, s: &str) -> Result<Decimal, MarketDataError> {
        Decimal::from_str(s).map_err(|_| MarketDataError::ParseFailed {
            message: format!("non-numeric value for {}: {:?}", field, s),
        })
    }

    /// Extract the latest bar from a TIME_SERIES_DAILY response body.
    ///
    /// The first series entry is authoritative; no date sorting happens
    /// here.
    fn parse_latest(text: &str) -> Result<Option<DailyBar>, MarketDataError> {
        let response: TimeSeriesResponse =
            serde_json::from_str(text).map_err(|e| MarketDataError::ParseFailed {
                message: format!("unexpected response shape: {}", e),
            })?;

        Self::check_api_error(
            &response.error_message,
            &response.note,
            &response.information,
        )?;

        let time_series = match response.time_series {
            Some(series) => series,
            None => return Ok(None),
        };

        let (date_str, daily) = match time_series.first() {
            Some(entry) => entry,
            None => return Ok(None),
        };

        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| {
            MarketDataError::ParseFailed {
                message: format!("unparseable series date: {:?}", date_str),
            }
        })?;

        let volume = i64::from_str(&daily.volume).map_err(|_| MarketDataError::ParseFailed {
            message: format!("non-numeric value for 5. volume: {:?}", daily.volume),
        })?;

        Ok(Some(DailyBar {
            date,
            open: Self::parse_decimal("1. open", &daily.open)?,
            high: Self::parse_decimal("2. high", &daily.high)?,
            low: Self::parse_decimal("3. low", &daily.low)?,
            close: Self::parse_decimal("4. close", &daily.close)?,
            volume,
        }))
    }
}

#[async_trait]
impl DailyBarProvider for AlphaVantageProvider {
    async fn latest_daily_bar(&self, symbol: &str) -> Result<Option<DailyBar>, MarketDataError> {
        let params = [("function", "TIME_SERIES_DAILY"), ("symbol", symbol)];
        let text = self.fetch(&params).await?;
        Self::parse_latest(&text)
    }
}
