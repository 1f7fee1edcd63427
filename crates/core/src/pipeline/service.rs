//! The daily pipeline: fetch → store → fetch-prior → generate → store.
//!
//! Five ordered stages, each gating the next; no per-stage retry, no
//! parallelism between stages. External-call failures (provider, model)
//! end the run early but successfully — only store errors propagate, since
//! an unreachable store signals a deployment problem rather than a
//! transient data condition. Every stage transition is logged with symbol
//! and dates so a run can be reconstructed from logs alone.

use chrono::{Duration, NaiveDate, Utc};
use log::{info, warn};
use std::sync::Arc;

use tickerbrief_market_data::DailyBarProvider;

use crate::bars::{Bar, BarStore};
use crate::errors::Result;
use crate::insights::{Insight, InsightGenerator, InsightStore};

/// How a pipeline run ended.
///
/// Every variant except a propagated store error is a *successful* run;
/// the variant records which stage stopped it so callers and tests don't
/// have to scrape logs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// All five stages ran; an insight was written for this date.
    Completed {
        /// Date of the insight row that was written
        insight_date: NaiveDate,
    },

    /// The provider answered but had no series entries.
    QuoteUnavailable,

    /// The provider call failed (transport or parse); reason was logged.
    FetchFailed,

    /// No stored bar existed one calendar day before now.
    ReferenceBarMissing {
        /// The reference date that was looked up
        date: NaiveDate,
    },

    /// Insight generation failed; the stage-3 bar write is kept.
    InsightFailed {
        /// Date of the reference bar that was being analyzed
        date: NaiveDate,
    },
}

/// Orchestrates one end-to-end run for a single configured symbol.
pub struct PipelineService {
    symbol: String,
    provider: Arc<dyn DailyBarProvider>,
    bar_store: Arc<dyn BarStore>,
    generator: Arc<dyn InsightGenerator>,
    insight_store: Arc<dyn InsightStore>,
}

impl PipelineService {
    pub fn new(
        symbol: String,
        provider: Arc<dyn DailyBarProvider>,
        bar_store: Arc<dyn BarStore>,
        generator: Arc<dyn InsightGenerator>,
        insight_store: Arc<dyn InsightStore>,
    ) -> Self {
        Self {
            symbol,
            provider,
            bar_store,
            generator,
            insight_store,
        }
    }

    /// The symbol this pipeline is configured for.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Run the pipeline once, end to end.
    ///
    /// Returns `Err` only when the store is unreachable; every other
    /// failure mode is reported through [`RunOutcome`].
    pub async fn run(&self) -> Result<RunOutcome> {
        info!("Starting pipeline run for {}", self.symbol);

        // Stage 1: bootstrap
        self.bar_store.ensure_schema()?;

        // Stage 2: fetch
        let daily = match self.provider.latest_daily_bar(&self.symbol).await {
            Ok(Some(daily)) => daily,
            Ok(None) => {
                info!("No time series data available for {}", self.symbol);
                return Ok(RunOutcome::QuoteUnavailable);
            }
            Err(e) if e.is_transport() => {
                warn!("Failed to fetch daily bar for {}: {}", self.symbol, e);
                return Ok(RunOutcome::FetchFailed);
            }
            Err(e) => {
                warn!("Malformed daily bar response for {}: {}", self.symbol, e);
                return Ok(RunOutcome::FetchFailed);
            }
        };

        // Stage 3: persist bar
        let bar = Bar::from_daily(&self.symbol, daily);
        self.bar_store.upsert_bar(&bar).await?;
        info!("Stored bar for {} on {}", bar.symbol, bar.date);

        // Stage 4: fetch reference bar. The lookup is one calendar day
        // before *now*, not before the bar just stored — on a first run or
        // after a gap this misses and the run ends here.
        let reference_date = Self::reference_date();
        let reference_bar = match self.bar_store.get_bar(&self.symbol, reference_date)? {
            Some(found) => found,
            None => {
                info!(
                    "No stored bar for {} on {}, skipping insight generation",
                    self.symbol, reference_date
                );
                return Ok(RunOutcome::ReferenceBarMissing {
                    date: reference_date,
                });
            }
        };

        // Stage 5: generate + persist insight
        info!(
            "Generating insight for {} on {}",
            self.symbol, reference_bar.date
        );
        let generated = match self.generator.generate(&self.symbol, &reference_bar).await {
            Ok(generated) => generated,
            Err(e) => {
                warn!(
                    "Insight generation failed for {} on {}: {}",
                    self.symbol, reference_bar.date, e
                );
                return Ok(RunOutcome::InsightFailed {
                    date: reference_bar.date,
                });
            }
        };

        let insight = Insight {
            date: reference_bar.date,
            symbol: self.symbol.clone(),
            summary: generated.summary,
            recommendations: generated.recommendations,
        };
        self.insight_store.upsert_insight(&insight).await?;
        info!("Stored insight for {} on {}", self.symbol, insight.date);

        Ok(RunOutcome::Completed {
            insight_date: insight.date,
        })
    }

    /// One calendar day before the current UTC date.
    pub fn reference_date() -> NaiveDate {
        Utc::now().date_naive() - Duration::days(1)
    }
}
