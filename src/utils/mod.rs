//! Metric and statistics helpers.

pub mod metrics;
pub mod stats;

pub use metrics::{
    evaluate, Evaluation, EvaluationConfig, MetricsSummary, RSquaredFormula,
    ZeroDenominatorPolicy,
};
