use serde::{Deserialize, Serialize};

/// How a lookup resolves a target that falls between two samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rounding {
    /// Smallest index whose value is `>= target`.
    Up,
    /// Largest index whose value is `<= target`.
    Down,
    /// Nearer of the `Up`/`Down` candidates; equal distances go right.
    Closest,
}

/// Binary search over an ascending slice.
///
/// Out-of-range targets clamp to `[0, len - 1]` instead of failing. An empty
/// slice yields `0`.
#[must_use]
pub fn search_sorted(values: &[f64], target: f64, rounding: Rounding) -> usize {
    if values.is_empty() {
        return 0;
    }
    search_sorted_in(values, target, rounding, 0, values.len() - 1)
}

/// Same as [`search_sorted`], restricted to the inclusive index window `[lo, hi]`.
#[must_use]
pub fn search_sorted_in(
    values: &[f64],
    target: f64,
    rounding: Rounding,
    lo: usize,
    hi: usize,
) -> usize {
    if values.is_empty() {
        return 0;
    }
    let hi = hi.min(values.len() - 1);
    let lo = lo.min(hi);
    let window = &values[lo..=hi];
    let last = window.len() - 1;

    // First position whose value is >= target.
    let upper = window.partition_point(|value| *value < target);
    let resolved = match rounding {
        Rounding::Up => upper.min(last),
        Rounding::Down => window
            .partition_point(|value| *value <= target)
            .saturating_sub(1),
        Rounding::Closest => {
            if upper == 0 {
                0
            } else if upper > last {
                last
            } else {
                let lower = upper - 1;
                if (target - window[lower]).abs() < (window[upper] - target).abs() {
                    lower
                } else {
                    upper
                }
            }
        }
    };
    lo + resolved
}

#[cfg(test)]
mod tests {
    use super::{Rounding, search_sorted, search_sorted_in};

    #[test]
    fn exact_hits_resolve_to_the_same_index_for_every_mode() {
        let values = [1.0, 2.0, 4.0, 8.0];
        for rounding in [Rounding::Up, Rounding::Down, Rounding::Closest] {
            assert_eq!(search_sorted(&values, 4.0, rounding), 2);
        }
    }

    #[test]
    fn window_search_offsets_into_the_full_slice() {
        let values = [0.0, 10.0, 20.0, 30.0, 40.0];
        assert_eq!(search_sorted_in(&values, 25.0, Rounding::Up, 2, 4), 3);
        assert_eq!(search_sorted_in(&values, 5.0, Rounding::Down, 2, 4), 2);
        assert_eq!(search_sorted_in(&values, 99.0, Rounding::Closest, 0, 2), 2);
    }
}
