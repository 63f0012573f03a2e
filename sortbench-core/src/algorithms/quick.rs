//! Quick sort over a three-way filter partition.
//!
//! Each step copies the segment into `less`, `equal` and `greater` vectors
//! around the middle element instead of swapping in place. That costs O(n)
//! extra space and is kept on purpose: it is the simple formulation of the
//! algorithm, not a space-optimal one.
//!
//! Segments wait on a heap-allocated work stack, so already-sorted or
//! adversarial inputs never deepen the call stack.

use crate::stop::checkpoint;
use std::cmp::Ordering;

enum Segment<T> {
    /// Still needs partitioning
    Unsorted(Vec<T>),
    /// Every element equals the pivot that produced it
    Settled(Vec<T>),
}

/// Sort ascending.
pub fn quick_sort<T: Ord + Clone>(values: Vec<T>) -> Vec<T> {
    let mut sorted = Vec::with_capacity(values.len());
    let mut stack = vec![Segment::Unsorted(values)];

    while let Some(segment) = stack.pop() {
        let run = match segment {
            Segment::Settled(run) => {
                sorted.extend(run);
                continue;
            }
            Segment::Unsorted(run) if run.len() <= 1 => {
                sorted.extend(run);
                continue;
            }
            Segment::Unsorted(run) => run,
        };

        checkpoint();
        let pivot = run[run.len() / 2].clone();
        let mut less = Vec::new();
        let mut equal = Vec::new();
        let mut greater = Vec::new();
        for item in run {
            match item.cmp(&pivot) {
                Ordering::Less => less.push(item),
                Ordering::Equal => equal.push(item),
                Ordering::Greater => greater.push(item),
            }
        }

        // LIFO: `less` is emitted first, `greater` last.
        stack.push(Segment::Unsorted(greater));
        stack.push(Segment::Settled(equal));
        stack.push(Segment::Unsorted(less));
    }

    sorted
}
