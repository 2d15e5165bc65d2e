use std::ops::Range;
use std::thread;

use crossbeam_channel::unbounded;
use salesman_core::Point;

use super::context::SearchContext;
use super::types::{LocalBest, Progress, ProgressTracker, Solution};
use super::{check_points, finish, solve_trivial};
use crate::error::{Result, SearchError};
use crate::options::{Control, SearchOptions};

enum WorkerEvent {
    Progress(u64),
    Done(Result<LocalBest>),
}

/// Splits the `n!` steps into one contiguous range per thread. Each worker
/// unranks its own start and walks with private buffers; results come back
/// over a channel and the shortest wins, ties going to the earliest position,
/// so the answer matches the sequential walk.
pub fn solve_parallel(
    points: &[Point],
    options: &SearchOptions,
    mut on_progress: impl FnMut(Progress),
) -> Result<Solution> {
    let total = check_points(points)?;
    if let Some(solution) = solve_trivial(points, options, total) {
        return Ok(solution);
    }

    let n = points.len() as u64;
    // At least one full phase per worker.
    let workers = (options.threads.max(1) as u64).min(total / n).max(1);
    let ranges = partition(total, workers);
    log::debug!(
        "brute force: {} points, {total} permutations, {workers} threads",
        points.len()
    );

    let control = Control::new(options);
    let metric = options.metric;
    let (tx, rx) = unbounded();

    let outcome = thread::scope(|scope| {
        for (id, range) in ranges.into_iter().enumerate() {
            let tx = tx.clone();
            let control = &control;
            scope.spawn(move || {
                log::debug!("worker {id}: steps {}..{}", range.start, range.end);
                let result = SearchContext::new(points, metric, range.start).map(|mut ctx| {
                    let exhaustive = ctx.run(range, control, |steps| {
                        let _ = tx.send(WorkerEvent::Progress(steps));
                    });
                    ctx.into_best(exhaustive)
                });
                if result.is_err() {
                    control.abort();
                }
                let _ = tx.send(WorkerEvent::Done(result));
            });
        }
        drop(tx);

        let mut tracker = ProgressTracker::new(total);
        let mut bests = Vec::new();
        let mut failure = None;
        for event in rx.iter() {
            match event {
                WorkerEvent::Progress(steps) => {
                    if let Some(progress) = tracker.advance(steps) {
                        on_progress(progress);
                    }
                }
                WorkerEvent::Done(Ok(best)) => bests.push(best),
                WorkerEvent::Done(Err(err)) => {
                    failure.get_or_insert(err);
                }
            }
        }
        match failure {
            Some(err) => Err(err),
            None => Ok(bests),
        }
    });

    let best = reduce(outcome?).ok_or(SearchError::WorkerLost)?;
    Ok(finish(best, total))
}

fn partition(total: u64, workers: u64) -> Vec<Range<u64>> {
    let bound = |i: u64| (u128::from(total) * u128::from(i) / u128::from(workers)) as u64;
    (0..workers).map(|i| bound(i)..bound(i + 1)).collect()
}

fn reduce(bests: Vec<LocalBest>) -> Option<LocalBest> {
    let steps_evaluated = bests.iter().map(|b| b.steps_evaluated).sum();
    let exhaustive = bests.iter().all(|b| b.exhaustive);
    bests
        .into_iter()
        .min_by(|a, b| {
            a.length
                .total_cmp(&b.length)
                .then(a.position.cmp(&b.position))
        })
        .map(|best| LocalBest {
            steps_evaluated,
            exhaustive,
            ..best
        })
}
