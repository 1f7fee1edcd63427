//! Insight persistence: Diesel row models and the `InsightStore`
//! implementation.

mod model;
mod repository;

pub use model::{InsightRow, NewInsightRow};
pub use repository::InsightRepository;
