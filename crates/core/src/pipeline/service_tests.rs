//! Pipeline orchestration tests with in-memory collaborators.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use std::sync::{Arc, Mutex};

use tickerbrief_market_data::{DailyBar, DailyBarProvider, MarketDataError};

use crate::bars::{Bar, BarStore};
use crate::errors::Result;
use crate::insights::{GeneratedInsight, Insight, InsightError, InsightGenerator, InsightStore};
use crate::pipeline::{PipelineService, RunOutcome};

// ============================================================================
// In-memory collaborators
// ============================================================================

enum ProviderScript {
    Bar(DailyBar),
    Empty,
    Fail,
}

struct ScriptedProvider {
    script: ProviderScript,
}

#[async_trait]
impl DailyBarProvider for ScriptedProvider {
    async fn latest_daily_bar(&self, _symbol: &str) ->
        std::result::Result<Option<DailyBar>, MarketDataError>
    {
        match &self.script {
            ProviderScript::Bar(bar) => Ok(Some(bar.clone())),
            ProviderScript::Empty => Ok(None),
            ProviderScript::Fail => Err(MarketDataError::ProviderError {
                provider: "SCRIPTED".to_string(),
                message: "connection reset".to_string(),
            }),
        }
    }
}

#[derive(Default)]
struct MemoryBarStore {
    bars: Mutex<Vec<Bar>>,
}

#[async_trait]
impl BarStore for MemoryBarStore {
    fn ensure_schema(&self) -> Result<()> {
        Ok(())
    }

    async fn upsert_bar(&self, bar: &Bar) -> Result<()> {
        let mut bars = self.bars.lock().unwrap();
        if let Some(existing) = bars
            .iter_mut()
            .find(|b| b.symbol == bar.symbol && b.date == bar.date)
        {
            *existing = bar.clone();
        } else {
            bars.push(bar.clone());
        }
        Ok(())
    }

    fn get_bar(&self, symbol: &str, date: NaiveDate) -> Result<Option<Bar>> {
        let bars = self.bars.lock().unwrap();
        Ok(bars
            .iter()
            .find(|b| b.symbol == symbol && b.date == date)
            .cloned())
    }
}

#[derive(Default)]
struct MemoryInsightStore {
    insights: Mutex<Vec<Insight>>,
}

#[async_trait]
impl InsightStore for MemoryInsightStore {
    async fn upsert_insight(&self, insight: &Insight) -> Result<()> {
        let mut insights = self.insights.lock().unwrap();
        if let Some(existing) = insights.iter_mut().find(|i| i.date == insight.date) {
            *existing = insight.clone();
        } else {
            insights.push(insight.clone());
        }
        Ok(())
    }

    fn get_insight(&self, date: NaiveDate) -> Result<Option<Insight>> {
        let insights = self.insights.lock().unwrap();
        Ok(insights.iter().find(|i| i.date == date).cloned())
    }
}

#[derive(Default)]
struct ScriptedGenerator {
    fail: bool,
    calls: Mutex<Vec<Bar>>,
}

#[async_trait]
impl InsightGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        _symbol: &str,
        bar: &Bar,
    ) -> std::result::Result<GeneratedInsight, InsightError> {
        self.calls.lock().unwrap().push(bar.clone());
        if self.fail {
            return Err(InsightError::Provider("quota exceeded".to_string()));
        }
        Ok(GeneratedInsight {
            summary: "Strong close on elevated volume.".to_string(),
            recommendations: "1. Hold.\n2. Review stop levels.".to_string(),
        })
    }
}

// ============================================================================
// Fixtures
// ============================================================================

fn sample_daily(date: NaiveDate) -> DailyBar {
    DailyBar {
        date,
        open: dec!(100.0),
        high: dec!(105.0),
        low: dec!(99.0),
        close: dec!(104.0),
        volume: 1_000_000,
    }
}

struct Harness {
    pipeline: PipelineService,
    bar_store: Arc<MemoryBarStore>,
    insight_store: Arc<MemoryInsightStore>,
    generator: Arc<ScriptedGenerator>,
}

fn harness(script: ProviderScript, generator_fails: bool) -> Harness {
    let bar_store = Arc::new(MemoryBarStore::default());
    let insight_store = Arc::new(MemoryInsightStore::default());
    let generator = Arc::new(ScriptedGenerator {
        fail: generator_fails,
        calls: Mutex::new(Vec::new()),
    });
    let pipeline = PipelineService::new(
        "IBM".to_string(),
        Arc::new(ScriptedProvider { script }),
        bar_store.clone(),
        generator.clone(),
        insight_store.clone(),
    );
    Harness {
        pipeline,
        bar_store,
        insight_store,
        generator,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn run_without_quote_data_stores_nothing() {
    let h = harness(ProviderScript::Empty, false);

    let outcome = h.pipeline.run().await.unwrap();

    assert_eq!(outcome, RunOutcome::QuoteUnavailable);
    assert!(h.bar_store.bars.lock().unwrap().is_empty());
    assert!(h.insight_store.insights.lock().unwrap().is_empty());
}

#[tokio::test]
async fn fetch_failure_ends_run_without_error() {
    let h = harness(ProviderScript::Fail, false);

    let outcome = h.pipeline.run().await.unwrap();

    assert_eq!(outcome, RunOutcome::FetchFailed);
    assert!(h.bar_store.bars.lock().unwrap().is_empty());
    assert!(h.generator.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn first_run_persists_bar_but_skips_insight() {
    // The fetched bar is dated today, so the "one day before now" lookup
    // finds nothing.
    let today = chrono::Utc::now().date_naive();
    let h = harness(ProviderScript::Bar(sample_daily(today)), false);

    let outcome = h.pipeline.run().await.unwrap();

    assert_eq!(
        outcome,
        RunOutcome::ReferenceBarMissing {
            date: PipelineService::reference_date()
        }
    );
    assert_eq!(h.bar_store.bars.lock().unwrap().len(), 1);
    assert!(h.generator.calls.lock().unwrap().is_empty());
    assert!(h.insight_store.insights.lock().unwrap().is_empty());
}

#[tokio::test]
async fn run_generates_insight_from_the_reference_bar() {
    let today = chrono::Utc::now().date_naive();
    let reference_date = PipelineService::reference_date();
    let h = harness(ProviderScript::Bar(sample_daily(today)), false);

    // A bar for yesterday already exists, with values distinct from the
    // freshly fetched one.
    let seeded = Bar {
        symbol: "IBM".to_string(),
        date: reference_date,
        open: dec!(98.0),
        high: dec!(101.0),
        low: dec!(97.5),
        close: dec!(100.0),
        volume: 900_000,
    };
    h.bar_store.upsert_bar(&seeded).await.unwrap();

    let outcome = h.pipeline.run().await.unwrap();

    assert_eq!(
        outcome,
        RunOutcome::Completed {
            insight_date: reference_date
        }
    );

    // The generator saw the seeded reference bar, not the fetched one.
    let calls = h.generator.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0], seeded);

    let insight = h
        .insight_store
        .get_insight(reference_date)
        .unwrap()
        .unwrap();
    assert_eq!(insight.symbol, "IBM");
    assert_eq!(insight.summary, "Strong close on elevated volume.");
    assert_eq!(insight.recommendations, "1. Hold.\n2. Review stop levels.");
}

#[tokio::test]
async fn generator_failure_keeps_the_persisted_bar() {
    let today = chrono::Utc::now().date_naive();
    let reference_date = PipelineService::reference_date();
    let h = harness(ProviderScript::Bar(sample_daily(today)), true);

    let seeded = Bar {
        symbol: "IBM".to_string(),
        date: reference_date,
        open: dec!(98.0),
        high: dec!(101.0),
        low: dec!(97.5),
        close: dec!(100.0),
        volume: 900_000,
    };
    h.bar_store.upsert_bar(&seeded).await.unwrap();

    let outcome = h.pipeline.run().await.unwrap();

    assert_eq!(
        outcome,
        RunOutcome::InsightFailed {
            date: reference_date
        }
    );
    // Bar from stage 3 is not rolled back; no insight row exists.
    assert_eq!(h.bar_store.bars.lock().unwrap().len(), 2);
    assert!(h.insight_store.insights.lock().unwrap().is_empty());
}

#[tokio::test]
async fn repeated_runs_converge_to_one_bar_row() {
    let today = chrono::Utc::now().date_naive();
    let h = harness(ProviderScript::Bar(sample_daily(today)), false);

    h.pipeline.run().await.unwrap();
    h.pipeline.run().await.unwrap();

    assert_eq!(h.bar_store.bars.lock().unwrap().len(), 1);
}
