/// Outcome of a search.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    /// Best visiting order, slot by slot.
    pub order: Vec<u32>,
    pub length: f64,
    /// Number of steps from the identity after which `order` first appeared.
    pub position: u64,
    pub steps_evaluated: u64,
    pub total_steps: u64,
    /// False when a time limit or cancellation cut the enumeration short.
    pub exhaustive: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    pub done: u64,
    pub total: u64,
    pub percent: u8,
}

/// Turns step counts into whole-percent progress events, one per increase.
#[derive(Debug)]
pub(crate) struct ProgressTracker {
    done: u64,
    total: u64,
    percent: u8,
}

impl ProgressTracker {
    pub(crate) fn new(total: u64) -> Self {
        Self {
            done: 0,
            total: total.max(1),
            percent: 0,
        }
    }

    pub(crate) fn advance(&mut self, steps: u64) -> Option<Progress> {
        self.done = self.done.saturating_add(steps).min(self.total);
        let percent = (u128::from(self.done) * 100 / u128::from(self.total)) as u8;
        if percent <= self.percent {
            return None;
        }
        self.percent = percent;
        Some(Progress {
            done: self.done,
            total: self.total,
            percent,
        })
    }
}

/// Best order seen by one walker over its share of the chain.
#[derive(Clone, Debug)]
pub(crate) struct LocalBest {
    pub order: Vec<u32>,
    pub length: f64,
    pub position: u64,
    pub steps_evaluated: u64,
    pub exhaustive: bool,
}
