//! Accuracy metrics for forecast evaluation.
//!
//! [`Evaluation`] pairs observed and predicted values and computes MAE, MSE,
//! RMSE and R², returning them together as a [`MetricsSummary`].
//!
//! # R² formula
//!
//! By default R² is computed as
//!
//! ```text
//! R² = 1 - Σ(yᵢ - ȳ)² / Σ(yᵢ - ŷᵢ)²
//! ```
//!
//! which swaps numerator and denominator relative to the textbook definition
//! `1 - SS_res / SS_tot`. Existing reports were produced with this variant, so
//! it stays the default. Select [`RSquaredFormula::Standard`] through
//! [`EvaluationConfig`] to get the textbook value.
//!
//! # Zero denominators
//!
//! The denominator is compared with `0.0` exactly, after the float sums are
//! taken. A perfect prediction is the obvious trigger, but squared residuals
//! can also underflow to zero on tiny-magnitude data (around `1e-160` and
//! below), so a non-perfect forecast may still hit
//! [`ZeroDenominatorPolicy`].
//!
//! # Serialized form
//!
//! [`MetricsSummary`] fields are written as JSON-style numbers when finite.
//! Non-finite values, which the [`ZeroDenominatorPolicy::Infinite`] policy or
//! non-finite inputs produce, are written as the strings `"inf"`, `"-inf"`
//! and `"NaN"` and read back to the same value.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{EvalError, Result};
use crate::utils::stats;

/// Which R² definition to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RSquaredFormula {
    /// `1 - SS_tot / SS_res`. Matches historical results.
    #[default]
    Inverted,
    /// `1 - SS_res / SS_tot`, the coefficient of determination.
    Standard,
}

/// What to do when the R² denominator is exactly zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ZeroDenominatorPolicy {
    /// Fail with [`EvalError::DivisionByZero`].
    #[default]
    Error,
    /// Follow IEEE float division: `-inf` for a positive numerator, `NaN` for `0/0`.
    Infinite,
}

/// Configuration for metric evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// R² definition.
    pub r_squared_formula: RSquaredFormula,
    /// Zero-denominator handling for R².
    pub zero_denominator: ZeroDenominatorPolicy,
}

impl EvaluationConfig {
    /// Configuration using the textbook R² formula.
    pub fn standard() -> Self {
        Self {
            r_squared_formula: RSquaredFormula::Standard,
            ..Self::default()
        }
    }

    /// Set the R² formula.
    pub fn with_r_squared_formula(mut self, formula: RSquaredFormula) -> Self {
        self.r_squared_formula = formula;
        self
    }

    /// Set the zero-denominator policy.
    pub fn with_zero_denominator(mut self, policy: ZeroDenominatorPolicy) -> Self {
        self.zero_denominator = policy;
        self
    }
}

/// Goodness-of-fit metrics for one evaluation, in the fixed order
/// MAE, MSE, RMSE, R2.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    #[serde(rename = "MAE", with = "float_repr")]
    mae: f64,
    #[serde(rename = "MSE", with = "float_repr")]
    mse: f64,
    #[serde(rename = "RMSE", with = "float_repr")]
    rmse: f64,
    #[serde(rename = "R2", with = "float_repr")]
    r2: f64,
}

impl MetricsSummary {
    /// Metric labels in record order.
    pub const LABELS: [&'static str; 4] = ["MAE", "MSE", "RMSE", "R2"];

    pub(crate) fn new(mae: f64, mse: f64, rmse: f64, r2: f64) -> Self {
        Self { mae, mse, rmse, r2 }
    }

    /// Mean Absolute Error
    pub fn mae(&self) -> f64 {
        self.mae
    }

    /// Mean Squared Error
    pub fn mse(&self) -> f64 {
        self.mse
    }

    /// Root Mean Squared Error
    pub fn rmse(&self) -> f64 {
        self.rmse
    }

    /// R-squared, as configured at evaluation time
    pub fn r2(&self) -> f64 {
        self.r2
    }

    /// Metric values in record order.
    pub fn to_array(&self) -> [f64; 4] {
        [self.mae, self.mse, self.rmse, self.r2]
    }

    /// `(label, value)` pairs in record order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> {
        Self::LABELS.into_iter().zip(self.to_array())
    }
}

impl fmt::Display for MetricsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for label in Self::LABELS {
            write!(f, "{label:>12}")?;
        }
        writeln!(f)?;
        write!(f, "0 ")?;
        for value in self.to_array() {
            write!(f, "{value:>12.6}")?;
        }
        Ok(())
    }
}

/// Serde adapter that keeps non-finite floats distinguishable.
mod float_repr {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else if value.is_nan() {
            serializer.serialize_str("NaN")
        } else if value.is_sign_positive() {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_str("-inf")
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Ok(value),
            Repr::Text(text) => match text.as_str() {
                "NaN" => Ok(f64::NAN),
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                other => Err(serde::de::Error::custom(format!(
                    "expected a number, \"inf\", \"-inf\" or \"NaN\", got {other:?}"
                ))),
            },
        }
    }
}

/// Regression metrics over a pair of observed and predicted series.
///
/// # Example
/// ```
/// use forecast_eval::utils::metrics::Evaluation;
///
/// let actual = [1.0, 2.0, 3.0];
/// let predicted = [2.0, 2.0, 2.0];
/// let eval = Evaluation::new(&actual, &predicted).unwrap();
///
/// assert!((eval.mean_absolute_error() - 2.0 / 3.0).abs() < 1e-12);
/// assert!((eval.root_mean_squared_error() - 0.816496580927726).abs() < 1e-12);
///
/// let summary = eval.summary().unwrap();
/// assert_eq!(summary.r2(), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Evaluation<'a> {
    actual: &'a [f64],
    predicted: &'a [f64],
    mean_actual: f64,
    config: EvaluationConfig,
}

impl<'a> Evaluation<'a> {
    /// Pair `actual` with `predicted` using the default configuration.
    ///
    /// Fails with [`EvalError::InvalidInput`] if either slice is empty or the
    /// lengths differ.
    pub fn new(actual: &'a [f64], predicted: &'a [f64]) -> Result<Self> {
        Self::with_config(actual, predicted, EvaluationConfig::default())
    }

    /// Pair `actual` with `predicted` using an explicit configuration.
    pub fn with_config(
        actual: &'a [f64],
        predicted: &'a [f64],
        config: EvaluationConfig,
    ) -> Result<Self> {
        validate_pair(actual, predicted)?;

        let mean_actual = stats::mean(actual);
        debug!(
            n = actual.len(),
            mean_actual,
            formula = ?config.r_squared_formula,
            "prepared evaluation"
        );

        Ok(Self {
            actual,
            predicted,
            mean_actual,
            config,
        })
    }

    pub fn actual(&self) -> &[f64] {
        self.actual
    }

    pub fn predicted(&self) -> &[f64] {
        self.predicted
    }

    /// Mean of the observed values (ȳ).
    pub fn mean_actual(&self) -> f64 {
        self.mean_actual
    }

    /// Number of observation pairs.
    pub fn len(&self) -> usize {
        self.actual.len()
    }

    /// Always false; construction rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.actual.is_empty()
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Mean of |yᵢ - ŷᵢ|.
    pub fn mean_absolute_error(&self) -> f64 {
        stats::sum_absolute_residuals(self.actual, self.predicted) / self.len() as f64
    }

    /// Mean of (yᵢ - ŷᵢ)².
    pub fn mean_squared_error(&self) -> f64 {
        stats::sum_squared_residuals(self.actual, self.predicted) / self.len() as f64
    }

    /// Square root of [`mean_squared_error`](Self::mean_squared_error).
    pub fn root_mean_squared_error(&self) -> f64 {
        self.mean_squared_error().sqrt()
    }

    /// R² according to the configured formula.
    ///
    /// With the default configuration a perfect prediction has a zero
    /// denominator and yields [`EvalError::DivisionByZero`].
    pub fn r_squared(&self) -> Result<f64> {
        let ss_tot = stats::sum_squared_deviations(self.actual, self.mean_actual);
        let ss_res = stats::sum_squared_residuals(self.actual, self.predicted);

        let (numerator, denominator, denominator_name) = match self.config.r_squared_formula {
            RSquaredFormula::Inverted => (ss_tot, ss_res, "sum of squared residuals"),
            RSquaredFormula::Standard => (ss_res, ss_tot, "total sum of squares"),
        };

        if denominator == 0.0 {
            match self.config.zero_denominator {
                ZeroDenominatorPolicy::Error => {
                    warn!(denominator = denominator_name, "R² denominator is zero");
                    return Err(EvalError::DivisionByZero(format!(
                        "{denominator_name} is zero"
                    )));
                }
                ZeroDenominatorPolicy::Infinite => {
                    warn!(
                        denominator = denominator_name,
                        "R² denominator is zero, result is not finite"
                    );
                }
            }
        }

        Ok(1.0 - numerator / denominator)
    }

    /// All four metrics as one record.
    pub fn summary(&self) -> Result<MetricsSummary> {
        let mse = self.mean_squared_error();
        let summary = MetricsSummary::new(
            self.mean_absolute_error(),
            mse,
            mse.sqrt(),
            self.r_squared()?,
        );
        debug!(
            mae = summary.mae,
            mse = summary.mse,
            rmse = summary.rmse,
            r2 = summary.r2,
            "computed metrics summary"
        );
        Ok(summary)
    }
}

fn validate_pair(actual: &[f64], predicted: &[f64]) -> Result<()> {
    if actual.is_empty() {
        return Err(EvalError::InvalidInput("actual values are empty".to_string()));
    }
    if predicted.is_empty() {
        return Err(EvalError::InvalidInput(
            "predicted values are empty".to_string(),
        ));
    }
    if actual.len() != predicted.len() {
        return Err(EvalError::length_mismatch(
            "predicted",
            actual.len(),
            predicted.len(),
        ));
    }
    Ok(())
}

/// Calculate all metrics between actual and predicted values with the
/// default configuration.
///
/// # Arguments
/// * `actual` - Actual observed values
/// * `predicted` - Predicted/forecast values
///
/// # Returns
/// `MetricsSummary` with MAE, MSE, RMSE and R2
pub fn evaluate(actual: &[f64], predicted: &[f64]) -> Result<MetricsSummary> {
    Evaluation::new(actual, predicted)?.summary()
}

/// Calculate MAE between two slices.
pub fn mae(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    Ok(Evaluation::new(actual, predicted)?.mean_absolute_error())
}

/// Calculate MSE between two slices.
pub fn mse(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    Ok(Evaluation::new(actual, predicted)?.mean_squared_error())
}

/// Calculate RMSE between two slices.
pub fn rmse(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    Ok(Evaluation::new(actual, predicted)?.root_mean_squared_error())
}

/// Calculate R² between two slices with the default configuration.
pub fn r_squared(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    Evaluation::new(actual, predicted)?.r_squared()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn perfect_prediction_has_zero_error() {
        let actual = vec![1.0, 2.0, 3.0];
        let predicted = vec![1.0, 2.0, 3.0];

        let eval = Evaluation::new(&actual, &predicted).unwrap();

        assert_eq!(eval.mean_absolute_error(), 0.0);
        assert_eq!(eval.mean_squared_error(), 0.0);
        assert_eq!(eval.root_mean_squared_error(), 0.0);
    }

    #[test]
    fn perfect_prediction_r_squared_is_division_by_zero() {
        let actual = vec![1.0, 2.0, 3.0];
        let eval = Evaluation::new(&actual, &actual).unwrap();

        assert!(matches!(
            eval.r_squared(),
            Err(EvalError::DivisionByZero(_))
        ));
        assert!(matches!(eval.summary(), Err(EvalError::DivisionByZero(_))));
    }

    #[test]
    fn known_values_against_constant_prediction() {
        let actual = vec![1.0, 2.0, 3.0];
        let predicted = vec![2.0, 2.0, 2.0];
        // Residuals: -1, 0, 1

        let eval = Evaluation::new(&actual, &predicted).unwrap();

        assert_relative_eq!(eval.mean_actual(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(eval.mean_absolute_error(), 2.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(eval.mean_squared_error(), 2.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(
            eval.root_mean_squared_error(),
            0.816_496_580_927_726,
            epsilon = 1e-12
        );
        // SS_tot = 2, SS_res = 2
        assert_relative_eq!(eval.r_squared().unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn inverted_formula_divides_total_by_residual() {
        let actual = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let predicted = vec![1.5, 2.5, 2.5, 4.5, 4.5];
        // SS_tot = 10, SS_res = 5 * 0.25 = 1.25

        let eval = Evaluation::new(&actual, &predicted).unwrap();

        assert_relative_eq!(eval.r_squared().unwrap(), 1.0 - 10.0 / 1.25, epsilon = 1e-12);
    }

    #[test]
    fn standard_formula_divides_residual_by_total() {
        let actual = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let predicted = vec![1.5, 2.5, 2.5, 4.5, 4.5];

        let eval =
            Evaluation::with_config(&actual, &predicted, EvaluationConfig::standard()).unwrap();

        assert_relative_eq!(eval.r_squared().unwrap(), 1.0 - 1.25 / 10.0, epsilon = 1e-12);
    }

    #[test]
    fn standard_r_squared_negative_for_poor_model() {
        let actual = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let predicted = vec![5.0, 4.0, 3.0, 2.0, 1.0]; // Inverted
        // SS_res = 16 + 4 + 0 + 4 + 16 = 40, SS_tot = 10

        let eval =
            Evaluation::with_config(&actual, &predicted, EvaluationConfig::standard()).unwrap();

        assert_relative_eq!(eval.r_squared().unwrap(), -3.0, epsilon = 1e-12);
    }

    #[test]
    fn standard_formula_constant_series_is_division_by_zero() {
        let actual = vec![4.0, 4.0, 4.0];
        let predicted = vec![3.0, 4.0, 5.0];

        let eval =
            Evaluation::with_config(&actual, &predicted, EvaluationConfig::standard()).unwrap();

        let err = eval.r_squared().unwrap_err();
        assert_eq!(
            err,
            EvalError::DivisionByZero("total sum of squares is zero".to_string())
        );
    }

    #[test]
    fn infinite_policy_follows_float_division() {
        let actual = vec![1.0, 2.0, 3.0];
        let config = EvaluationConfig::default().with_zero_denominator(ZeroDenominatorPolicy::Infinite);

        let eval = Evaluation::with_config(&actual, &actual, config).unwrap();
        let r2 = eval.r_squared().unwrap();
        assert!(r2.is_infinite() && r2.is_sign_negative());

        let summary = eval.summary().unwrap();
        assert_eq!(summary.mae(), 0.0);
        assert!(summary.r2().is_infinite());

        // Constant series predicted exactly: 0 / 0
        let flat = vec![2.0, 2.0];
        let eval = Evaluation::with_config(&flat, &flat, config).unwrap();
        assert!(eval.r_squared().unwrap().is_nan());
    }

    #[test]
    fn infinite_policy_with_standard_formula_on_constant_series() {
        let actual = vec![4.0, 4.0, 4.0];
        let predicted = vec![3.0, 4.0, 5.0];
        let config = EvaluationConfig::standard()
            .with_zero_denominator(ZeroDenominatorPolicy::Infinite);

        let eval = Evaluation::with_config(&actual, &predicted, config).unwrap();
        let r2 = eval.r_squared().unwrap();

        // SS_res = 2, SS_tot = 0
        assert!(r2.is_infinite() && r2.is_sign_negative());
    }

    #[test]
    fn underflowing_residuals_count_as_zero_denominator() {
        let actual = vec![1e-170, 2e-170, 3e-170];
        let predicted = vec![2e-170, 2e-170, 2e-170];

        let eval = Evaluation::new(&actual, &predicted).unwrap();

        assert!(eval.mean_absolute_error() > 0.0);
        assert_eq!(eval.mean_squared_error(), 0.0);
        assert!(matches!(
            eval.r_squared(),
            Err(EvalError::DivisionByZero(_))
        ));
    }

    #[test]
    fn length_mismatch_is_invalid_input() {
        let actual = vec![1.0, 2.0, 3.0];
        let predicted = vec![1.0, 2.0];

        let result = Evaluation::new(&actual, &predicted);
        assert!(matches!(result, Err(EvalError::InvalidInput(_))));
    }

    #[test]
    fn empty_input_is_invalid_input() {
        assert!(matches!(
            Evaluation::new(&[], &[]),
            Err(EvalError::InvalidInput(_))
        ));
        assert!(matches!(
            Evaluation::new(&[1.0], &[]),
            Err(EvalError::InvalidInput(_))
        ));
        assert!(matches!(
            Evaluation::new(&[], &[1.0]),
            Err(EvalError::InvalidInput(_))
        ));
    }

    #[test]
    fn summary_preserves_field_order() {
        let actual = vec![1.0, 2.0, 3.0];
        let predicted = vec![2.0, 2.0, 2.0];

        let summary = evaluate(&actual, &predicted).unwrap();
        let labels: Vec<_> = summary.iter().map(|(label, _)| label).collect();

        assert_eq!(labels, vec!["MAE", "MSE", "RMSE", "R2"]);
        assert_eq!(
            summary.to_array(),
            [summary.mae(), summary.mse(), summary.rmse(), summary.r2()]
        );
        assert_eq!(summary.rmse(), summary.mse().sqrt());
    }

    #[test]
    fn summary_display_is_one_labeled_row() {
        let summary = MetricsSummary::new(0.5, 0.25, 0.5, -7.0);
        let rendered = summary.to_string();
        let lines: Vec<_> = rendered.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0].split_whitespace().collect::<Vec<_>>(),
            vec!["MAE", "MSE", "RMSE", "R2"]
        );
        assert_eq!(
            lines[1].split_whitespace().collect::<Vec<_>>(),
            vec!["0", "0.500000", "0.250000", "0.500000", "-7.000000"]
        );
    }

    #[test]
    fn standalone_functions_match_evaluation() {
        let actual = [1.0, 2.0, 3.0];
        let predicted = [1.5, 2.5, 3.5];

        assert_relative_eq!(mae(&actual, &predicted).unwrap(), 0.5, epsilon = 1e-12);
        assert_relative_eq!(mse(&actual, &predicted).unwrap(), 0.25, epsilon = 1e-12);
        assert_relative_eq!(rmse(&actual, &predicted).unwrap(), 0.5, epsilon = 1e-12);
        // SS_tot = 2, SS_res = 0.75
        assert_relative_eq!(
            r_squared(&actual, &predicted).unwrap(),
            1.0 - 2.0 / 0.75,
            epsilon = 1e-12
        );
    }

    #[test]
    fn standalone_functions_validate_input() {
        assert!(matches!(mae(&[], &[]), Err(EvalError::InvalidInput(_))));
        assert!(matches!(
            rmse(&[1.0], &[1.0, 2.0]),
            Err(EvalError::InvalidInput(_))
        ));
        assert!(matches!(
            r_squared(&[1.0, 2.0], &[1.0, 2.0]),
            Err(EvalError::DivisionByZero(_))
        ));
    }

    #[test]
    fn config_builders() {
        let config = EvaluationConfig::default();
        assert_eq!(config.r_squared_formula, RSquaredFormula::Inverted);
        assert_eq!(config.zero_denominator, ZeroDenominatorPolicy::Error);

        let config = EvaluationConfig::standard()
            .with_zero_denominator(ZeroDenominatorPolicy::Infinite);
        assert_eq!(config.r_squared_formula, RSquaredFormula::Standard);
        assert_eq!(config.zero_denominator, ZeroDenominatorPolicy::Infinite);

        let config = config.with_r_squared_formula(RSquaredFormula::Inverted);
        assert_eq!(config.r_squared_formula, RSquaredFormula::Inverted);
    }

    #[test]
    fn evaluation_exposes_inputs() {
        let actual = [3.0, 5.0];
        let predicted = [4.0, 4.0];
        let eval = Evaluation::new(&actual, &predicted).unwrap();

        assert_eq!(eval.actual(), &actual);
        assert_eq!(eval.predicted(), &predicted);
        assert_eq!(eval.len(), 2);
        assert!(!eval.is_empty());
        assert_eq!(eval.config(), &EvaluationConfig::default());
    }
}
