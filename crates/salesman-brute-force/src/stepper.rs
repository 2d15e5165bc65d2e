//! Plain changes: every permutation of `n` items as a chain of `n!` adjacent
//! transpositions (Steinhaus–Johnson–Trotter order).
//!
//! Step `k` splits into `phase = k / n` and `offset = k % n`. For the first
//! `n - 1` offsets of a phase the largest item walks one slot: leftwards from
//! the right end on even phases, rightwards from the left end on odd phases.
//! The last offset of a phase applies step `phase` of the `n - 1` item chain
//! to the remaining items, which sit right of the largest item on even phases
//! and left of it on odd ones. Two items alternate a single swap.
//!
//! The chain is a cycle: after all `n!` steps the sequence is back at the
//! identity, and every permutation in between appears exactly once.

/// Largest `n` whose `n!` fits the `u64` step counter.
pub const MAX_POINTS: usize = 20;

/// `n!`, with `0! = 1`. `None` when it overflows `u64`.
pub fn factorial(n: usize) -> Option<u64> {
    (1..=n as u64).try_fold(1u64, |acc, k| acc.checked_mul(k))
}

/// Left slot `a` of the pair `(a, a + 1)` swapped by step `step` of an `n` item
/// chain, `n >= 2`.
#[inline]
pub fn swap_position(n: usize, step: u64) -> usize {
    debug_assert!(n >= 2);
    let mut n = n;
    let mut step = step;
    let mut shift = 0;
    while n > 2 {
        let len = n as u64;
        let phase = step / len;
        let offset = (step % len) as usize;
        let even = phase % 2 == 0;
        if offset < n - 1 {
            return shift + if even { n - 2 - offset } else { offset };
        }
        // Largest item is parked at the left end on even phases.
        if even {
            shift += 1;
        }
        step = phase;
        n -= 1;
    }
    shift
}

/// Applies step `step` to `sequence` in place. Slices shorter than two are left
/// untouched.
#[inline]
pub fn step<T>(sequence: &mut [T], step: u64) {
    let n = sequence.len();
    if n < 2 {
        return;
    }
    let a = swap_position(n, step);
    sequence.swap(a, a + 1);
}

/// The permutation reached after `position` steps from the identity, without
/// walking the chain.
pub fn permutation_at(n: usize, position: u64) -> Vec<u32> {
    let mut buf = Vec::with_capacity(n);
    fill_permutation_at(&mut buf, n, position);
    buf
}

pub(crate) fn fill_permutation_at(buf: &mut Vec<u32>, n: usize, position: u64) {
    buf.clear();
    match n {
        0 => return,
        1 => {
            buf.push(0);
            return;
        }
        _ => {}
    }

    let mut k = match factorial(n) {
        Some(total) => position % total,
        None => position,
    };
    // Slot of the largest item at each level, from n items down to 3.
    let mut slots = Vec::with_capacity(n);
    for m in (3..=n).rev() {
        let len = m as u64;
        let phase = k / len;
        let offset = (k % len) as usize;
        slots.push(if phase % 2 == 0 { m - 1 - offset } else { offset });
        k = phase;
    }

    if k % 2 == 0 {
        buf.extend([0, 1]);
    } else {
        buf.extend([1, 0]);
    }
    for (m, slot) in (3..=n).zip(slots.into_iter().rev()) {
        buf.insert(slot, (m - 1) as u32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn identity(n: usize) -> Vec<u32> {
        (0..n as u32).collect()
    }

    fn is_permutation(seq: &[u32]) -> bool {
        let mut sorted = seq.to_vec();
        sorted.sort_unstable();
        sorted == identity(seq.len())
    }

    #[test]
    fn factorial_values() {
        assert_eq!(factorial(0), Some(1));
        assert_eq!(factorial(1), Some(1));
        assert_eq!(factorial(5), Some(120));
        assert_eq!(factorial(10), Some(3_628_800));
        assert_eq!(factorial(MAX_POINTS), Some(2_432_902_008_176_640_000));
        assert_eq!(factorial(MAX_POINTS + 1), None);
    }

    #[test]
    fn every_step_swaps_one_adjacent_pair() {
        for n in 2..=7 {
            let total = factorial(n).unwrap();
            let mut seq = identity(n);
            for k in 0..total {
                let before = seq.clone();
                step(&mut seq, k);
                let changed: Vec<usize> = (0..n).filter(|&i| before[i] != seq[i]).collect();
                assert_eq!(changed.len(), 2, "n={n} step={k}");
                assert_eq!(changed[1], changed[0] + 1, "n={n} step={k}");
                assert!(is_permutation(&seq), "n={n} step={k}: {seq:?}");
            }
        }
    }

    #[test]
    fn enumerates_each_permutation_once() {
        for n in 2..=8 {
            let total = factorial(n).unwrap();
            let mut seq = identity(n);
            let mut seen = HashSet::with_capacity(total as usize);
            for k in 0..total {
                step(&mut seq, k);
                assert!(seen.insert(seq.clone()), "n={n}: {seq:?} repeated at step {k}");
            }
            assert_eq!(seen.len() as u64, total, "n={n}");
            assert!(seen.iter().all(|p| is_permutation(p)));
            assert_eq!(seq, identity(n), "n={n}: chain does not close");
        }
    }

    #[test]
    fn first_step_swaps_the_last_pair() {
        for n in 2..=9 {
            assert_eq!(swap_position(n, 0), n - 2);
        }
    }

    #[test]
    fn unranking_matches_walking() {
        for n in 0..=6 {
            let total = factorial(n).unwrap();
            let mut seq = identity(n);
            assert_eq!(permutation_at(n, 0), seq);
            for k in 0..total {
                step(&mut seq, k);
                assert_eq!(permutation_at(n, k + 1), seq, "n={n} position={}", k + 1);
            }
        }
    }

    #[test]
    fn unranking_deep_positions() {
        let n = 9;
        let mut seq = identity(n);
        let checkpoints = [1u64, 4_321, 40_320, 200_003, 362_879];
        let mut next = 0;
        for k in 0..factorial(n).unwrap() {
            step(&mut seq, k);
            if next < checkpoints.len() && k + 1 == checkpoints[next] {
                assert_eq!(permutation_at(n, k + 1), seq);
                next += 1;
            }
        }
        assert_eq!(next, checkpoints.len());
    }

    #[test]
    fn short_sequences_are_untouched() {
        let mut empty: [u32; 0] = [];
        step(&mut empty, 0);
        let mut single = [0u32];
        step(&mut single, 0);
        assert_eq!(single, [0]);
        assert_eq!(permutation_at(1, 7), vec![0]);
    }

    /// The end-anchored variant (offset 0 swaps an end pair, other offsets
    /// sweep without ever delegating to a smaller chain) only covers n <= 4.
    #[test]
    fn end_anchored_sweep_repeats_from_five_items() {
        fn end_anchored(seq: &mut [u32], k: u64) {
            let n = seq.len() as u64;
            let (phase, offset) = (k / n, k % n);
            let a = match (phase % 2 == 1, offset) {
                (true, 0) => 0,
                (true, o) => n - o - 1,
                (false, 0) => n - 2,
                (false, o) => o - 1,
            };
            seq.swap(a as usize, a as usize + 1);
        }
        let distinct = |n: usize| {
            let mut seq = identity(n);
            let mut seen = HashSet::new();
            for k in 0..factorial(n).unwrap() {
                end_anchored(&mut seq, k);
                seen.insert(seq.clone());
            }
            seen.len()
        };
        assert_eq!(distinct(4), 24);
        assert_eq!(distinct(5), 20);
    }
}
