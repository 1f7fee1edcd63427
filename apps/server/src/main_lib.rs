use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use tickerbrief_ai::{GroqInsightGenerator, InsightGeneratorConfig};
use tickerbrief_core::pipeline::PipelineService;
use tickerbrief_market_data::AlphaVantageProvider;
use tickerbrief_storage_sqlite::{BarRepository, InsightRepository};

use crate::config::Config;

pub struct AppState {
    pub pipeline: Arc<PipelineService>,
    pub admin_token: Option<String>,
}

pub fn init_tracing() {
    let fmt_layer = fmt::layer().json().with_current_span(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Wire pool → repositories → provider → generator → pipeline.
///
/// Fails only when the database is unreachable; missing API keys degrade at
/// run time instead of blocking startup, so health checks stay meaningful
/// on a half-configured deployment.
pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    tickerbrief_storage_sqlite::init(&config.db_path)?;
    let pool = tickerbrief_storage_sqlite::create_pool(&config.db_path)?;
    tickerbrief_storage_sqlite::run_migrations(&pool)?;
    tracing::info!("Database path in use: {}", config.db_path);

    if config.alpha_vantage_api_key.is_empty() {
        tracing::warn!("ALPHA_VANTAGE_API_KEY is not set; fetches will fail until it is");
    }
    if config.groq_api_key.is_none() {
        tracing::warn!("GROQ_API_KEY is not set; insight generation will be skipped");
    }

    let bar_repository = Arc::new(BarRepository::new(pool.clone()));
    let insight_repository = Arc::new(InsightRepository::new(pool.clone()));
    let provider = Arc::new(AlphaVantageProvider::new(
        config.alpha_vantage_api_key.clone(),
    ));
    let generator = Arc::new(GroqInsightGenerator::new(
        config.groq_api_key.clone(),
        InsightGeneratorConfig::default(),
    ));

    let pipeline = Arc::new(PipelineService::new(
        config.symbol.clone(),
        provider,
        bar_repository,
        generator,
        insight_repository,
    ));

    Ok(Arc::new(AppState {
        pipeline,
        admin_token: config.admin_token.clone(),
    }))
}
