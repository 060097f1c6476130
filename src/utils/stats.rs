//! Statistical utility functions.
//!
//! Everything here works on plain `f64` slices and performs no validation;
//! callers check lengths before reaching for these helpers.

/// Calculate the mean of a slice.
///
/// # Example
/// ```
/// use forecast_eval::utils::stats::mean;
///
/// assert!((mean(&[1.0, 2.0, 3.0, 4.0]) - 2.5).abs() < 1e-12);
/// assert!(mean(&[]).is_nan());
/// ```
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Total sum of squares around a given center: Σ(x - center)².
pub fn sum_squared_deviations(values: &[f64], center: f64) -> f64 {
    values.iter().map(|x| (x - center).powi(2)).sum()
}

/// Residual sum of squares: Σ(a[i] - p[i])².
///
/// Pairs are taken up to the shorter of the two slices.
pub fn sum_squared_residuals(actual: &[f64], predicted: &[f64]) -> f64 {
    actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum()
}

/// Sum of absolute residuals: Σ|a[i] - p[i]|.
pub fn sum_absolute_residuals(actual: &[f64], predicted: &[f64]) -> f64 {
    actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs())
        .sum()
}
