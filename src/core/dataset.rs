//! Immutable holder for a train/test split of a forecasting problem.

use crate::error::{EvalError, Result};
use crate::utils::metrics::{Evaluation, EvaluationConfig, MetricsSummary};

/// Targets and optional exogenous features, already split into a training
/// and a test segment.
///
/// Exogenous features are row-major: `x_train[i]` holds the regressors that
/// accompany `y_train[i]`. A dataset without regressors has empty feature
/// matrices on both sides.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    y_train: Vec<f64>,
    y_test: Vec<f64>,
    x_train: Vec<Vec<f64>>,
    x_test: Vec<Vec<f64>>,
}

/// Builder for constructing a [`Dataset`].
#[derive(Debug, Clone, Default)]
pub struct DatasetBuilder {
    y_train: Vec<f64>,
    y_test: Vec<f64>,
    x_train: Vec<Vec<f64>>,
    x_test: Vec<Vec<f64>>,
}

impl DatasetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn y_train(mut self, values: Vec<f64>) -> Self {
        self.y_train = values;
        self
    }

    pub fn y_test(mut self, values: Vec<f64>) -> Self {
        self.y_test = values;
        self
    }

    /// Set training regressors, one row per training observation.
    pub fn x_train(mut self, rows: Vec<Vec<f64>>) -> Self {
        self.x_train = rows;
        self
    }

    /// Set test regressors, one row per test observation.
    pub fn x_test(mut self, rows: Vec<Vec<f64>>) -> Self {
        self.x_test = rows;
        self
    }

    pub fn build(self) -> Result<Dataset> {
        if self.y_train.is_empty() {
            return Err(EvalError::InvalidInput("y_train is empty".to_string()));
        }
        if self.y_test.is_empty() {
            return Err(EvalError::InvalidInput("y_test is empty".to_string()));
        }

        match (self.x_train.is_empty(), self.x_test.is_empty()) {
            (true, true) => {}
            (false, false) => {
                if self.x_train.len() != self.y_train.len() {
                    return Err(EvalError::length_mismatch(
                        "x_train",
                        self.y_train.len(),
                        self.x_train.len(),
                    ));
                }
                if self.x_test.len() != self.y_test.len() {
                    return Err(EvalError::length_mismatch(
                        "x_test",
                        self.y_test.len(),
                        self.x_test.len(),
                    ));
                }

                let width = self.x_train[0].len();
                if width == 0 {
                    return Err(EvalError::InvalidInput(
                        "feature rows must not be empty".to_string(),
                    ));
                }
                for row in self.x_train.iter().chain(self.x_test.iter()) {
                    if row.len() != width {
                        return Err(EvalError::length_mismatch("feature row", width, row.len()));
                    }
                }
            }
            (true, false) => {
                return Err(EvalError::InvalidInput(
                    "x_test given without x_train".to_string(),
                ));
            }
            (false, true) => {
                return Err(EvalError::InvalidInput(
                    "x_train given without x_test".to_string(),
                ));
            }
        }

        Ok(Dataset {
            y_train: self.y_train,
            y_test: self.y_test,
            x_train: self.x_train,
            x_test: self.x_test,
        })
    }
}

impl Dataset {
    pub fn builder() -> DatasetBuilder {
        DatasetBuilder::new()
    }

    /// Create a dataset with targets only.
    pub fn new(y_train: Vec<f64>, y_test: Vec<f64>) -> Result<Self> {
        Self::builder().y_train(y_train).y_test(y_test).build()
    }

    pub fn y_train(&self) -> &[f64] {
        &self.y_train
    }

    pub fn y_test(&self) -> &[f64] {
        &self.y_test
    }

    pub fn x_train(&self) -> &[Vec<f64>] {
        &self.x_train
    }

    pub fn x_test(&self) -> &[Vec<f64>] {
        &self.x_test
    }

    pub fn train_len(&self) -> usize {
        self.y_train.len()
    }

    /// Length of the test segment, i.e. the forecast horizon to evaluate.
    pub fn test_len(&self) -> usize {
        self.y_test.len()
    }

    /// Number of exogenous regressors (0 when there are none).
    pub fn n_features(&self) -> usize {
        self.x_train.first().map_or(0, Vec::len)
    }

    pub fn has_features(&self) -> bool {
        !self.x_train.is_empty()
    }

    /// Evaluate a forecast of the test segment against `y_test`.
    pub fn evaluate(&self, predicted: &[f64]) -> Result<MetricsSummary> {
        self.evaluate_with(predicted, EvaluationConfig::default())
    }

    /// Evaluate a forecast of the test segment with an explicit configuration.
    pub fn evaluate_with(
        &self,
        predicted: &[f64],
        config: EvaluationConfig,
    ) -> Result<MetricsSummary> {
        Evaluation::with_config(&self.y_test, predicted, config)?.summary()
    }
}
