use std::ops::Range;

use salesman_core::{Point, TourMetric};

use super::types::LocalBest;
use crate::error::{Result, SearchError};
use crate::options::Control;
use crate::stepper::{fill_permutation_at, swap_position};

// Relative slack under which the running length is re-evaluated exactly
// before being compared with the best.
const SCREEN_TOLERANCE: f64 = 1e-9;
// Steps walked between two progress reports.
const REPORT_EVERY: u64 = 1 << 12;

/// Walks a contiguous share of the plain-changes chain, keeping the working
/// order, its running length and the best order seen.
pub(crate) struct SearchContext<'a> {
    pub points: &'a [Point],
    pub metric: TourMetric,
    pub n: usize,

    pub working: Vec<u32>,
    // Length of `working`, updated incrementally between resyncs
    pub current: f64,

    pub best: Vec<u32>,
    pub best_length: f64,
    pub best_position: u64,

    pub steps_evaluated: u64,
}

impl<'a> SearchContext<'a> {
    /// Context positioned `start` steps into the chain.
    pub fn new(points: &'a [Point], metric: TourMetric, start: u64) -> Result<Self> {
        let n = points.len();
        let mut working = alloc_order(n)?;
        fill_permutation_at(&mut working, n, start);
        let mut best = alloc_order(n)?;
        best.extend_from_slice(&working);
        let current = metric.length(points, &working);

        Ok(SearchContext {
            points,
            metric,
            n,
            working,
            current,
            best,
            best_length: current,
            best_position: start,
            steps_evaluated: 0,
        })
    }

    /// Walks `steps`, calling `report` with the number of steps done since the
    /// previous call. Returns false when `control` stopped the walk early.
    pub fn run(&mut self, steps: Range<u64>, control: &Control, mut report: impl FnMut(u64)) -> bool {
        let n = self.n as u64;
        // Ranges handed to workers may start mid-phase.
        if control.should_stop() {
            return false;
        }
        let mut pending = 0;
        for step in steps {
            if step % n == 0 {
                if control.should_stop() {
                    report(pending);
                    return false;
                }
                self.resync();
                if pending >= REPORT_EVERY {
                    report(pending);
                    pending = 0;
                }
            }
            self.advance(step);
            pending += 1;
        }
        report(pending);
        true
    }

    #[inline]
    fn advance(&mut self, step: u64) {
        let a = swap_position(self.n, step);
        self.current += self.metric.swap_delta(self.points, &self.working, a);
        self.working.swap(a, a + 1);
        self.steps_evaluated += 1;

        let slack = SCREEN_TOLERANCE * self.best_length.abs().max(1.0);
        if self.current < self.best_length + slack {
            self.resync();
            if self.current < self.best_length {
                self.best.copy_from_slice(&self.working);
                self.best_length = self.current;
                self.best_position = step + 1;
                log::trace!("new best {:.6} at position {}", self.current, step + 1);
            }
        }
    }

    fn resync(&mut self) {
        self.current = self.metric.length(self.points, &self.working);
    }

    pub fn into_best(self, exhaustive: bool) -> LocalBest {
        LocalBest {
            order: self.best,
            length: self.best_length,
            position: self.best_position,
            steps_evaluated: self.steps_evaluated,
            exhaustive,
        }
    }
}

fn alloc_order(n: usize) -> Result<Vec<u32>> {
    let mut order = Vec::new();
    order
        .try_reserve_exact(n)
        .map_err(|_| SearchError::Allocation { len: n })?;
    Ok(order)
}
