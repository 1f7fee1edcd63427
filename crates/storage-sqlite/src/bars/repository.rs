use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::upsert::excluded;
use std::sync::Arc;

use super::model::{BarRow, NewBarRow, DATE_FORMAT};
use crate::db::{self, DbPool};
use crate::errors::IntoCore;
use crate::schema::bars::dsl as bars_dsl;
use tickerbrief_core::bars::{Bar, BarStore};
use tickerbrief_core::Result;

/// `BarStore` implementation over a pooled SQLite connection.
///
/// Every operation acquires a connection for its own duration; there is no
/// cross-call transaction state.
pub struct BarRepository {
    pool: Arc<DbPool>,
}

impl BarRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BarStore for BarRepository {
    fn ensure_schema(&self) -> Result<()> {
        db::run_migrations(&self.pool)
    }

    async fn upsert_bar(&self, bar: &Bar) -> Result<()> {
        let row = NewBarRow::from(bar);
        let mut conn = db::get_connection(&self.pool)?;

        diesel::insert_into(bars_dsl::bars)
            .values(&row)
            .on_conflict((bars_dsl::symbol, bars_dsl::date))
            .do_update()
            .set((
                bars_dsl::open.eq(excluded(bars_dsl::open)),
                bars_dsl::high.eq(excluded(bars_dsl::high)),
                bars_dsl::low.eq(excluded(bars_dsl::low)),
                bars_dsl::close.eq(excluded(bars_dsl::close)),
                bars_dsl::volume.eq(excluded(bars_dsl::volume)),
            ))
            .execute(&mut conn)
            .into_core()?;

        Ok(())
    }

    fn get_bar(&self, symbol: &str, date: NaiveDate) -> Result<Option<Bar>> {
        let mut conn = db::get_connection(&self.pool)?;
        let date_str = date.format(DATE_FORMAT).to_string();

        let row = bars_dsl::bars
            .filter(bars_dsl::symbol.eq(symbol))
            .filter(bars_dsl::date.eq(&date_str))
            .first::<BarRow>(&mut conn)
            .optional()
            .into_core()?;

        row.map(Bar::try_from).transpose()
    }
}
