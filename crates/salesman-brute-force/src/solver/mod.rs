pub mod context;
pub mod parallel;
pub mod types;

use salesman_core::Point;

use crate::error::{Result, SearchError};
use crate::options::{Control, SearchOptions};
use crate::stepper::{factorial, MAX_POINTS};
use context::SearchContext;
use types::{LocalBest, ProgressTracker};

pub use types::{Progress, Solution};

/// Exhaustive search with default options: closed tours, one thread, no limit.
pub fn solve(points: &[Point]) -> Result<Solution> {
    solve_with(points, &SearchOptions::default(), |_| {})
}

/// Exhaustive search. More than one thread in `options` selects the
/// range-partitioned driver, which returns the same solution.
pub fn solve_with(
    points: &[Point],
    options: &SearchOptions,
    on_progress: impl FnMut(Progress),
) -> Result<Solution> {
    if options.threads > 1 {
        parallel::solve_parallel(points, options, on_progress)
    } else {
        solve_sequential(points, options, on_progress)
    }
}

fn solve_sequential(
    points: &[Point],
    options: &SearchOptions,
    mut on_progress: impl FnMut(Progress),
) -> Result<Solution> {
    let total = check_points(points)?;
    if let Some(solution) = solve_trivial(points, options, total) {
        return Ok(solution);
    }

    log::debug!(
        "brute force: {} points, {total} permutations, 1 thread",
        points.len()
    );
    let control = Control::new(options);
    let mut tracker = ProgressTracker::new(total);
    let mut ctx = SearchContext::new(points, options.metric, 0)?;
    let exhaustive = ctx.run(0..total, &control, |steps| {
        if let Some(progress) = tracker.advance(steps) {
            on_progress(progress);
        }
    });

    Ok(finish(ctx.into_best(exhaustive), total))
}

/// Validates the point set and returns the number of steps, `n!`.
pub(crate) fn check_points(points: &[Point]) -> Result<u64> {
    if let Some(index) = points
        .iter()
        .position(|p| !p.x.is_finite() || !p.y.is_finite())
    {
        return Err(SearchError::NonFinitePoint { index });
    }
    factorial(points.len()).ok_or(SearchError::TooManyPoints {
        n: points.len(),
        max: MAX_POINTS,
    })
}

/// Zero or one point: already optimal, nothing to walk. The single order
/// counts toward `total_steps` but no step is evaluated.
pub(crate) fn solve_trivial(
    points: &[Point],
    options: &SearchOptions,
    total: u64,
) -> Option<Solution> {
    if points.len() >= 2 {
        return None;
    }
    let order: Vec<u32> = (0..points.len() as u32).collect();
    Some(Solution {
        length: options.metric.length(points, &order),
        order,
        position: 0,
        steps_evaluated: 0,
        total_steps: total,
        exhaustive: true,
    })
}

pub(crate) fn finish(best: LocalBest, total: u64) -> Solution {
    log::debug!(
        "search finished: best {:.6} at position {}, {} of {total} steps{}",
        best.length,
        best.position,
        best.steps_evaluated,
        if best.exhaustive { "" } else { " (stopped early)" }
    );
    Solution {
        order: best.order,
        length: best.length,
        position: best.position,
        steps_evaluated: best.steps_evaluated,
        total_steps: total,
        exhaustive: best.exhaustive,
    }
}
