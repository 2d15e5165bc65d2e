#![deny(clippy::all)]

pub mod dataset;
pub mod error;
pub mod point;
pub mod tour;

pub use dataset::{Dataset, DatasetHeader, DatasetSummary};
pub use error::{Error, Result};
pub use point::{distance, Point};
pub use tour::{is_permutation, tour_length, validate_order, TourMetric};
