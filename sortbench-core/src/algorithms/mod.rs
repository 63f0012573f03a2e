//! Algorithm Registry
//!
//! The five sorts under benchmark, each a plain function from an owned
//! vector to a sorted vector. Several of them sort in place; callers that
//! need the original input keep their own copy (the metric collector always
//! hands out a fresh clone).
//!
//! The algorithms are generic so their stability can be checked with tagged
//! values. The registry instantiates them at `i64`.
//!
//! Every sort calls [`checkpoint`](crate::checkpoint) once per outer step,
//! which lets the collector stop a measurement that overran its budget.

mod bubble;
mod insertion;
mod merge;
mod quick;
mod selection;

pub use bubble::{BubbleStats, bubble_sort, bubble_sort_counted};
pub use insertion::insertion_sort;
pub use merge::{merge, merge_sort};
pub use quick::quick_sort;
pub use selection::selection_sort;

/// Signature shared by every registered sort
pub type SortFn = fn(Vec<i64>) -> Vec<i64>;

/// A registered sorting algorithm
#[derive(Debug, Clone, Copy)]
pub struct AlgorithmEntry {
    /// Unique identifier, also the series label
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Average-case time complexity
    pub average_time: &'static str,
    /// Worst-case time complexity
    pub worst_time: &'static str,
    /// Auxiliary space
    pub extra_space: &'static str,
    /// Whether equal elements keep their relative order
    pub stable: bool,
    /// The sort itself
    pub sort: SortFn,
}

impl AlgorithmEntry {
    /// Run the sort on an owned input
    #[inline]
    pub fn run(&self, values: Vec<i64>) -> Vec<i64> {
        (self.sort)(values)
    }
}

/// Every algorithm, in benchmark order
pub static REGISTRY: [AlgorithmEntry; 5] = [
    AlgorithmEntry {
        name: "bubble",
        description: "Bubble sort with early exit",
        average_time: "O(n^2)",
        worst_time: "O(n^2)",
        extra_space: "O(1)",
        stable: true,
        sort: bubble_sort::<i64>,
    },
    AlgorithmEntry {
        name: "quick",
        description: "Quick sort, middle pivot, three-way filter partition",
        average_time: "O(n log n)",
        worst_time: "O(n^2)",
        extra_space: "O(n)",
        stable: false,
        sort: quick_sort::<i64>,
    },
    AlgorithmEntry {
        name: "selection",
        description: "Selection sort",
        average_time: "O(n^2)",
        worst_time: "O(n^2)",
        extra_space: "O(1)",
        stable: false,
        sort: selection_sort::<i64>,
    },
    AlgorithmEntry {
        name: "insertion",
        description: "Insertion sort",
        average_time: "O(n^2)",
        worst_time: "O(n^2)",
        extra_space: "O(1)",
        stable: true,
        sort: insertion_sort::<i64>,
    },
    AlgorithmEntry {
        name: "merge",
        description: "Top-down merge sort",
        average_time: "O(n log n)",
        worst_time: "O(n log n)",
        extra_space: "O(n)",
        stable: true,
        sort: merge_sort::<i64>,
    },
];

/// All registered algorithms in benchmark order
pub fn registry() -> &'static [AlgorithmEntry] {
    &REGISTRY
}

/// Look up an algorithm by name
pub fn find(name: &str) -> Option<&'static AlgorithmEntry> {
    REGISTRY.iter().find(|entry| entry.name == name)
}

/// Registered names in benchmark order
pub fn names() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|entry| entry.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn reference_sort(mut values: Vec<i64>) -> Vec<i64> {
        values.sort();
        values
    }

    /// Orders on `key` only; `tag` records the original position.
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Tagged {
        key: i8,
        tag: usize,
    }

    impl PartialOrd for Tagged {
        fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
            Some(self.cmp(other))
        }
    }

    impl Ord for Tagged {
        fn cmp(&self, other: &Self) -> std::cmp::Ordering {
            self.key.cmp(&other.key)
        }
    }

    fn tagged(keys: &[i8]) -> Vec<Tagged> {
        keys.iter()
            .enumerate()
            .map(|(tag, &key)| Tagged { key, tag })
            .collect()
    }

    fn is_stable(output: &[Tagged]) -> bool {
        output
            .windows(2)
            .all(|w| w[0].key != w[1].key || w[0].tag < w[1].tag)
    }

    #[test]
    fn test_registry_order() {
        let names: Vec<_> = names().collect();
        assert_eq!(names, ["bubble", "quick", "selection", "insertion", "merge"]);
    }

    #[test]
    fn test_find() {
        assert_eq!(find("merge").map(|e| e.name), Some("merge"));
        assert!(find("bogo").is_none());
    }

    #[test]
    fn test_duplicates_and_negatives() {
        for entry in registry() {
            assert_eq!(
                entry.run(vec![5, -3, 5, 0, -3]),
                vec![-3, -3, 0, 5, 5],
                "{} produced the wrong order",
                entry.name
            );
        }
    }

    #[test]
    fn test_empty_and_single_are_fixed_points() {
        for entry in registry() {
            assert_eq!(entry.run(Vec::new()), Vec::<i64>::new(), "{}", entry.name);
            assert_eq!(entry.run(vec![42]), vec![42], "{}", entry.name);
        }
    }

    #[test]
    fn test_all_zeros() {
        for entry in registry() {
            assert_eq!(entry.run(vec![0; 5]), vec![0; 5], "{}", entry.name);
        }
    }

    proptest! {
        #[test]
        fn prop_output_is_sorted_permutation(values in prop::collection::vec(-1000i64..=1000, 0..200)) {
            let expected = reference_sort(values.clone());
            for entry in registry() {
                prop_assert_eq!(entry.run(values.clone()), expected.clone(), "{}", entry.name);
            }
        }

        #[test]
        fn prop_sorting_is_idempotent(values in prop::collection::vec(any::<i64>(), 0..100)) {
            for entry in registry() {
                let once = entry.run(values.clone());
                prop_assert_eq!(entry.run(once.clone()), once, "{}", entry.name);
            }
        }

        #[test]
        fn prop_stable_sorts_keep_tie_order(keys in prop::collection::vec(0i8..4, 0..80)) {
            prop_assert!(is_stable(&bubble_sort(tagged(&keys))));
            prop_assert!(is_stable(&insertion_sort(tagged(&keys))));
            prop_assert!(is_stable(&merge_sort(tagged(&keys))));
        }
    }

    #[test]
    fn test_registry_stability_flags_match_behaviour() {
        let keys = [2, 1, 2, 1, 0, 2, 0, 1];
        for entry in registry().iter().filter(|e| e.stable) {
            let output = match entry.name {
                "bubble" => bubble_sort(tagged(&keys)),
                "insertion" => insertion_sort(tagged(&keys)),
                "merge" => merge_sort(tagged(&keys)),
                other => panic!("unexpected stable algorithm {other}"),
            };
            assert!(is_stable(&output), "{} reordered equal keys", entry.name);
        }
    }
}
