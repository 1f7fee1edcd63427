//! Database models for bars.
//!
//! Prices are stored as decimal strings and dates as `YYYY-MM-DD` text;
//! conversion failures surface as internal database errors rather than
//! panics.

use chrono::NaiveDate;
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use tickerbrief_core::bars::Bar;
use tickerbrief_core::{DatabaseError, Error};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Database model for a persisted bar.
#[derive(Queryable, Identifiable, Selectable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::bars)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BarRow {
    pub id: i32,
    pub symbol: String,
    pub date: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub volume: i64,
    pub created_at: String,
}

/// Database model for inserting/upserting a bar.
///
/// `id` and `created_at` are left to the database.
#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::bars)]
pub struct NewBarRow {
    pub symbol: String,
    pub date: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub volume: i64,
}

impl From<&Bar> for NewBarRow {
    fn from(bar: &Bar) -> Self {
        Self {
            symbol: bar.symbol.clone(),
            date: bar.date.format(DATE_FORMAT).to_string(),
            open: bar.open.to_string(),
            high: bar.high.to_string(),
            low: bar.low.to_string(),
            close: bar.close.to_string(),
            volume: bar.volume,
        }
    }
}

fn parse_decimal(column: &str, value: &str) -> Result<Decimal, Error> {
    Decimal::from_str(value).map_err(|_| {
        Error::Database(DatabaseError::Internal(format!(
            "invalid decimal in bars.{}: {:?}",
            column, value
        )))
    })
}

impl TryFrom<BarRow> for Bar {
    type Error = Error;

    fn try_from(row: BarRow) -> Result<Self, Error> {
        let date = NaiveDate::parse_from_str(&row.date, DATE_FORMAT).map_err(|_| {
            Error::Database(DatabaseError::Internal(format!(
                "invalid date in bars.date: {:?}",
                row.date
            )))
        })?;

        Ok(Bar {
            symbol: row.symbol,
            date,
            open: parse_decimal("open", &row.open)?,
            high: parse_decimal("high", &row.high)?,
            low: parse_decimal("low", &row.low)?,
            close: parse_decimal("close", &row.close)?,
            volume: row.volume,
        })
    }
}
