//! Groq-backed insight generator.
//!
//! One chat-style completion per bar. The model's exact output format is
//! not guaranteed, so instead of parsing structure out of it the response
//! is split on the first line break: line one becomes the summary, the
//! remainder becomes the recommendations.

use async_trait::async_trait;
use log::debug;
use reqwest::Client as HttpClient;
use rig::{client::CompletionClient, completion::Prompt, providers::groq};

use tickerbrief_core::bars::Bar;
use tickerbrief_core::insights::{
    GeneratedInsight, InsightError, InsightGenerator, NO_RECOMMENDATIONS,
};

const PROVIDER_ID: &str = "groq";

const SYSTEM_PREAMBLE: &str = "You are a concise and clear financial AI assistant.";

/// Configuration for insight generation.
///
/// Model identifier, temperature and output bound are configuration, not
/// data — they are fixed for the lifetime of the generator.
pub struct InsightGeneratorConfig {
    /// Model to request completions from.
    pub model_id: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Maximum tokens to generate.
    pub max_tokens: u64,
}

impl Default for InsightGeneratorConfig {
    fn default() -> Self {
        Self {
            model_id: "llama-3.1-8b-instant".to_string(),
            temperature: 0.7,
            max_tokens: 500,
        }
    }
}

/// Insight generator backed by the Groq API.
pub struct GroqInsightGenerator {
    api_key: Option<String>,
    config: InsightGeneratorConfig,
}

impl GroqInsightGenerator {
    /// Create a new generator.
    ///
    /// A missing or empty `api_key` is not an error here — the generator
    /// reports [`InsightError::MissingApiKey`] at call time, which the
    /// pipeline downgrades to a logged early exit.
    pub fn new(api_key: Option<String>, config: InsightGeneratorConfig) -> Self {
        Self { api_key, config }
    }

    fn build_prompt(symbol: &str, bar: &Bar) -> String {
        format!(
            "You are an AI financial analyst. Based on the following stock data for {}:\n\n\
             date: {}, open: {}, high: {}, low: {}, close: {}, volume: {}\n\n\
             Provide:\n\
             1. A brief summary of performance.\n\
             2. Two to three actionable recommendations.",
            symbol, bar.date, bar.open, bar.high, bar.low, bar.close, bar.volume
        )
    }

    async fn complete(&self, prompt: &str) -> Result<String, InsightError> {
        let key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| InsightError::MissingApiKey(PROVIDER_ID.to_string()))?;

        let client: groq::Client<HttpClient> =
            groq::Client::new(key).map_err(|e| InsightError::Provider(e.to_string()))?;

        debug!(
            "Requesting completion from {} model {}",
            PROVIDER_ID, self.config.model_id
        );

        client
            .agent(&self.config.model_id)
            .preamble(SYSTEM_PREAMBLE)
            .temperature(self.config.temperature)
            .max_tokens(self.config.max_tokens)
            .build()
            .prompt(prompt)
            .await
            .map_err(|e| InsightError::Provider(e.to_string()))
    }
}

/// Split model output on the first line break.
///
/// The first line is the summary; everything after it is the
/// recommendations. With no line break the recommendations fall back to
/// [`NO_RECOMMENDATIONS`].
pub fn split_insight(content: &str) -> (String, String) {
    match content.split_once('\n') {
        Some((summary, rest)) => (summary.to_string(), rest.to_string()),
        None => (content.to_string(), NO_RECOMMENDATIONS.to_string()),
    }
}

#[async_trait]
impl InsightGenerator for GroqInsightGenerator {
    async fn generate(&self, symbol: &str, bar: &Bar) -> Result<GeneratedInsight, InsightError> {
        let prompt = Self::build_prompt(symbol, bar);
        let content = self.complete(&prompt).await?;
        let content = content.trim();
        if content.is_empty() {
            return Err(InsightError::EmptyResponse);
        }

        let (summary, recommendations) = split_insight(content);
        Ok(GeneratedInsight {
            summary,
            recommendations,
        })
    }
}
