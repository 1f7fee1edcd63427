use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::upsert::excluded;
use std::sync::Arc;

use super::model::{InsightRow, NewInsightRow};
use crate::bars::DATE_FORMAT;
use crate::db::{self, DbPool};
use crate::errors::IntoCore;
use crate::schema::insights::dsl as insights_dsl;
use tickerbrief_core::insights::{Insight, InsightStore};
use tickerbrief_core::Result;

/// `InsightStore` implementation over a pooled SQLite connection.
///
/// Same connection-per-call discipline as [`crate::bars::BarRepository`].
pub struct InsightRepository {
    pool: Arc<DbPool>,
}

impl InsightRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InsightStore for InsightRepository {
    async fn upsert_insight(&self, insight: &Insight) -> Result<()> {
        let row = NewInsightRow::from(insight);
        let mut conn = db::get_connection(&self.pool)?;

        diesel::insert_into(insights_dsl::insights)
            .values(&row)
            .on_conflict(insights_dsl::date)
            .do_update()
            .set((
                insights_dsl::symbol.eq(excluded(insights_dsl::symbol)),
                insights_dsl::summary.eq(excluded(insights_dsl::summary)),
                insights_dsl::recommendations.eq(excluded(insights_dsl::recommendations)),
            ))
            .execute(&mut conn)
            .into_core()?;

        Ok(())
    }

    fn get_insight(&self, date: NaiveDate) -> Result<Option<Insight>> {
        let mut conn = db::get_connection(&self.pool)?;
        let date_str = date.format(DATE_FORMAT).to_string();

        let row = insights_dsl::insights
            .filter(insights_dsl::date.eq(&date_str))
            .first::<InsightRow>(&mut conn)
            .optional()
            .into_core()?;

        row.map(Insight::try_from).transpose()
    }
}
