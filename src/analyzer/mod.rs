//! Analyzer module - resume quality analysis pipeline

pub mod details;
pub mod engine;
pub mod metrics;
pub mod recommendations;
pub mod rules;
pub mod scoring;
pub mod status;
pub mod thresholds;

pub use details::DetailGenerator;
pub use engine::{AggregateStats, AnalysisEngine, FileOutcome, FileReport};
pub use metrics::MetricExtractor;
pub use recommendations::RecommendationGenerator;
pub use scoring::ScoreCalculator;
pub use status::StatusClassifier;
