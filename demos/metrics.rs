//! Accuracy Metrics Example
//!
//! Evaluates a hold-out forecast and prints the metrics summary.
//!
//! Run with: cargo run --example metrics

use forecast_eval::prelude::*;

fn main() {
    println!("=== Accuracy Metrics Example ===\n");

    let history = vec![
        100.0, 110.0, 120.0, 115.0, 125.0, 130.0, 128.0, 135.0, 140.0, 138.0,
    ];
    let dataset = match Dataset::new(history[..6].to_vec(), history[6..].to_vec()) {
        Ok(ds) => ds,
        Err(e) => {
            println!("Invalid dataset: {}", e);
            return;
        }
    };
    let forecast = vec![131.0, 133.0, 136.0, 139.0];

    println!("Test values: {:?}", dataset.y_test());
    println!("Forecast:    {:?}", forecast);
    println!();

    // =========================================================================
    // Summary with the default (historical) R² formula
    // =========================================================================
    println!("--- Summary ---\n");
    match dataset.evaluate(&forecast) {
        Ok(summary) => println!("{}\n", summary),
        Err(e) => println!("Error calculating metrics: {}", e),
    }

    // =========================================================================
    // Textbook R²
    // =========================================================================
    println!("--- Summary (standard R²) ---\n");
    match dataset.evaluate_with(&forecast, EvaluationConfig::standard()) {
        Ok(summary) => {
            for (label, value) in summary.iter() {
                println!("{:<5} {:.4}", label, value);
            }
        }
        Err(e) => println!("Error calculating metrics: {}", e),
    }

    // =========================================================================
    // Perfect forecast
    // =========================================================================
    println!("\n--- Perfect forecast ---\n");
    match dataset.evaluate(dataset.y_test()) {
        Ok(summary) => println!("{}", summary),
        Err(e) => println!("R² undefined: {}", e),
    }
}
