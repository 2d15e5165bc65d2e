use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use salesman_core::TourMetric;

/// Shared flag that asks a running search to stop at its next phase boundary.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Clone, Debug)]
pub struct SearchOptions {
    pub metric: TourMetric,
    /// Worker threads. `1` runs the sequential driver.
    pub threads: usize,
    /// Wall-clock budget. When it runs out the best order seen so far is
    /// returned and the solution is marked non-exhaustive.
    pub time_limit: Option<Duration>,
    pub cancel: Option<CancelToken>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            metric: TourMetric::Closed,
            threads: 1,
            time_limit: None,
            cancel: None,
        }
    }
}

impl SearchOptions {
    pub fn with_metric(mut self, metric: TourMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }
}

/// Stop conditions of one search invocation, shared by its workers.
pub(crate) struct Control {
    cancel: Option<CancelToken>,
    deadline: Option<Instant>,
    // Raised by a failing worker so its siblings wind down.
    abort: AtomicBool,
}

impl Control {
    pub(crate) fn new(options: &SearchOptions) -> Self {
        Self {
            cancel: options.cancel.clone(),
            deadline: options.time_limit.map(|limit| Instant::now() + limit),
            abort: AtomicBool::new(false),
        }
    }

    pub(crate) fn abort(&self) {
        self.abort.store(true, Ordering::Relaxed);
    }

    pub(crate) fn should_stop(&self) -> bool {
        self.abort.load(Ordering::Relaxed)
            || self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
            || self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}
