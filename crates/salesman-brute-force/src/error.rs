use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("{n} points need {n}! steps, which overflows the step counter (at most {max} points)")]
    TooManyPoints { n: usize, max: usize },
    #[error("could not allocate a visiting-order buffer of {len} entries")]
    Allocation { len: usize },
    #[error("point {index} has a non-finite coordinate")]
    NonFinitePoint { index: usize },
    #[error("a search worker exited without reporting a result")]
    WorkerLost,
}

pub type Result<T> = std::result::Result<T, SearchError>;
