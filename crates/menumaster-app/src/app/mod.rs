//! Application Layer
//!
//! Orchestrates between the front ends (CLI/GUI) and the vision pipeline.

pub mod analysis_service;

// Re-export main types for convenience
pub use analysis_service::{AnalysisOutcome, AnalysisService};
