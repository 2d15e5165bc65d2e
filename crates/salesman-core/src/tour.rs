use serde::{Deserialize, Serialize};

use crate::point::{distance, Point};
use crate::{Error, Result};

/// Objective used to score a visiting order.
///
/// `Closed` is the usual closed-tour length. `Legacy` reproduces the scoring
/// of the first generation of FOXSELLS datasets: slot `i` contributes the edge
/// between point `order[i]` and point `order[i] + 1` (array neighbours, not
/// order neighbours) for every slot but the last, plus a fixed edge between
/// point `0` and point `n - 1`. An index of `n` wraps to `0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TourMetric {
    #[default]
    Closed,
    Legacy,
}

impl TourMetric {
    pub fn length(self, points: &[Point], order: &[u32]) -> f64 {
        match self {
            TourMetric::Closed => tour_length(points, order),
            TourMetric::Legacy => legacy_length(points, order),
        }
    }

    /// Length change caused by swapping slots `a` and `a + 1`, evaluated on
    /// `order` before the swap.
    #[inline]
    pub fn swap_delta(self, points: &[Point], order: &[u32], a: usize) -> f64 {
        let n = order.len();
        debug_assert!(a + 1 < n);
        match self {
            TourMetric::Closed => {
                // A cycle of three or fewer points has one length in both directions.
                if n < 4 {
                    return 0.0;
                }
                let at = |slot: usize| points[order[slot] as usize];
                let prev = at((a + n - 1) % n);
                let next = at((a + 2) % n);
                let (left, right) = (at(a), at(a + 1));
                distance(&prev, &right) + distance(&left, &next)
                    - distance(&prev, &left)
                    - distance(&right, &next)
            }
            TourMetric::Legacy => {
                // Only the last summed slot (n - 2) can change its edge.
                if a + 2 != n {
                    return 0.0;
                }
                legacy_edge(points, order[a + 1]) - legacy_edge(points, order[a])
            }
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "closed" => Ok(TourMetric::Closed),
            "legacy" => Ok(TourMetric::Legacy),
            other => Err(Error::invalid_argument(format!(
                "unknown tour metric '{other}', expected 'closed' or 'legacy'"
            ))),
        }
    }
}

/// Closed tour length: consecutive slots plus the edge from the last slot back
/// to the first.
pub fn tour_length(points: &[Point], order: &[u32]) -> f64 {
    let n = order.len();
    let mut sum = 0.0;
    for i in 0..n {
        let a = &points[order[i] as usize];
        let b = &points[order[(i + 1) % n] as usize];
        sum += distance(a, b);
    }
    sum
}

fn legacy_length(points: &[Point], order: &[u32]) -> f64 {
    let n = order.len();
    if n == 0 {
        return 0.0;
    }
    let mut sum = 0.0;
    for &id in &order[..n - 1] {
        sum += legacy_edge(points, id);
    }
    sum + distance(&points[0], &points[n - 1])
}

#[inline(always)]
fn legacy_edge(points: &[Point], id: u32) -> f64 {
    let id = id as usize;
    distance(&points[id], &points[(id + 1) % points.len()])
}

/// True when `order` holds every identity in `0..n` exactly once.
pub fn is_permutation(order: &[u32], n: usize) -> bool {
    if order.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &id in order {
        match seen.get_mut(id as usize) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}

pub fn validate_order(order: &[u32], n: usize) -> Result<()> {
    if is_permutation(order, n) {
        Ok(())
    } else {
        Err(Error::invalid_data(format!(
            "visiting order of length {} is not a permutation of 0..{n}",
            order.len()
        )))
    }
}
