//! # forecast-eval
//!
//! Accuracy metrics for time series forecasting workflows.
//!
//! [`Evaluation`](utils::Evaluation) computes MAE, MSE, RMSE and R² for a pair
//! of observed and predicted series and returns them as one
//! [`MetricsSummary`](utils::MetricsSummary). [`Dataset`](core::Dataset) holds
//! an already-split train/test problem and evaluates forecasts of its test
//! segment.
//!
//! ```
//! use forecast_eval::prelude::*;
//!
//! let summary = evaluate(&[1.0, 2.0, 3.0], &[2.0, 2.0, 2.0]).unwrap();
//! assert!((summary.rmse() - 0.8165).abs() < 1e-4);
//! ```

pub mod core;
pub mod error;
pub mod utils;

pub use error::{EvalError, Result};

pub mod prelude {
    pub use crate::core::{Dataset, DatasetBuilder};
    pub use crate::error::{EvalError, Result};
    pub use crate::utils::{
        evaluate, Evaluation, EvaluationConfig, MetricsSummary, RSquaredFormula,
        ZeroDenominatorPolicy,
    };
}
