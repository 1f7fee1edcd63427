//! Pipeline orchestration.

mod service;

#[cfg(test)]
mod service_tests;

pub use service::{PipelineService, RunOutcome};
