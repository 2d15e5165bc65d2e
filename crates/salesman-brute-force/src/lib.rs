#![deny(clippy::all)]

mod error;
mod options;
mod solver;
pub mod stepper;

pub use error::{Result, SearchError};
pub use options::{CancelToken, SearchOptions};
pub use solver::parallel::solve_parallel;
pub use solver::{solve, solve_with, Progress, Solution};
pub use stepper::{factorial, permutation_at, MAX_POINTS};
