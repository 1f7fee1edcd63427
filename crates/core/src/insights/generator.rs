//! Insight generator trait and its failure taxonomy.

use async_trait::async_trait;
use thiserror::Error;

use crate::bars::Bar;

/// Sentinel used when the model output has no line break to split on.
pub const NO_RECOMMENDATIONS: &str = "No recommendations.";

/// The (summary, recommendations) pair produced for one bar.
///
/// Both parts are non-empty: generators that get nothing usable back
/// return [`InsightError::EmptyResponse`] instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedInsight {
    /// First line of the model output
    pub summary: String,

    /// Remainder of the output, or [`NO_RECOMMENDATIONS`]
    pub recommendations: String,
}

/// Closed set of generation failure reasons.
///
/// Callers can tell an unconfigured deployment from a provider outage from
/// a model that answered with nothing, without reading logs.
#[derive(Error, Debug)]
pub enum InsightError {
    /// No API key configured for the generative service.
    #[error("Missing API key for provider {0}")]
    MissingApiKey(String),

    /// The generative service rejected or failed the call
    /// (auth, quota, transport).
    #[error("Provider error: {0}")]
    Provider(String),

    /// The service answered with an empty completion.
    #[error("Empty response from provider")]
    EmptyResponse,
}

/// Trait for natural-language insight generation.
#[async_trait]
pub trait InsightGenerator: Send + Sync {
    /// Produce a summary and recommendations for one bar.
    async fn generate(&self, symbol: &str, bar: &Bar) -> Result<GeneratedInsight, InsightError>;
}
