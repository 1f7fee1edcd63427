//! Database models for insights.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::bars::DATE_FORMAT;
use tickerbrief_core::insights::Insight;
use tickerbrief_core::{DatabaseError, Error};

/// Database model for a persisted insight.
#[derive(Queryable, Identifiable, Selectable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::insights)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InsightRow {
    pub id: i32,
    pub date: String,
    pub symbol: String,
    pub summary: String,
    pub recommendations: String,
    pub created_at: String,
}

/// Database model for inserting/upserting an insight.
#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::insights)]
pub struct NewInsightRow {
    pub date: String,
    pub symbol: String,
    pub summary: String,
    pub recommendations: String,
}

impl From<&Insight> for NewInsightRow {
    fn from(insight: &Insight) -> Self {
        Self {
            date: insight.date.format(DATE_FORMAT).to_string(),
            symbol: insight.symbol.clone(),
            summary: insight.summary.clone(),
            recommendations: insight.recommendations.clone(),
        }
    }
}

impl TryFrom<InsightRow> for Insight {
    type Error = Error;

    fn try_from(row: InsightRow) -> Result<Self, Error> {
        let date = NaiveDate::parse_from_str(&row.date, DATE_FORMAT).map_err(|_| {
            Error::Database(DatabaseError::Internal(format!(
                "invalid date in insights.date: {:?}",
                row.date
            )))
        })?;

        Ok(Insight {
            date,
            symbol: row.symbol,
            summary: row.summary,
            recommendations: row.recommendations,
        })
    }
}
