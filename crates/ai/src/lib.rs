//! LLM-backed insight generation for tickerbrief.
//!
//! Implements the core [`InsightGenerator`] trait with a one-shot Groq
//! completion via rig-core: a fixed system preamble, a prompt embedding the
//! bar data, and a first-newline split of the answer into summary and
//! recommendations.
//!
//! [`InsightGenerator`]: tickerbrief_core::insights::InsightGenerator

pub mod insight_generator;

pub use insight_generator::{split_insight, GroqInsightGenerator, InsightGeneratorConfig};
