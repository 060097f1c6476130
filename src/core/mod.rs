//! Core data structures for forecast evaluation.

mod dataset;

pub use dataset::{Dataset, DatasetBuilder};
