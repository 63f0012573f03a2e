//! Bubble sort with early exit.

use crate::stop::checkpoint;

/// Pass and swap counters collected by [`bubble_sort_counted`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BubbleStats {
    /// Full passes over the unsorted prefix
    pub passes: usize,
    /// Adjacent swaps performed
    pub swaps: usize,
}

/// Sort ascending. Stops after the first pass that performs no swap.
pub fn bubble_sort<T: Ord>(values: Vec<T>) -> Vec<T> {
    bubble_sort_counted(values).0
}

/// Same as [`bubble_sort`], also reporting how much work was done.
///
/// Already-sorted input of length `n >= 1` takes exactly one pass.
pub fn bubble_sort_counted<T: Ord>(mut values: Vec<T>) -> (Vec<T>, BubbleStats) {
    let mut stats = BubbleStats::default();
    let n = values.len();

    for i in 0..n {
        checkpoint();
        stats.passes += 1;
        let mut swapped = false;
        for j in 0..n - i - 1 {
            if values[j] > values[j + 1] {
                values.swap(j, j + 1);
                stats.swaps += 1;
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }

    (values, stats)
}
