//! Complexity Demonstrations
//!
//! Small routines whose step counts grow as O(1), O(n) and O(log n), used
//! by the `complexity` command to illustrate the theoretical space curves.

/// Index found (if any) and how many elements were inspected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub index: Option<usize>,
    pub steps: usize,
}

/// O(1): direct indexed access
pub fn element_at<T: Copy>(values: &[T], index: usize) -> Option<T> {
    values.get(index).copied()
}

/// O(n): scan front to back
pub fn linear_search<T: PartialEq>(values: &[T], target: &T) -> SearchOutcome {
    let mut steps = 0;
    for (i, value) in values.iter().enumerate() {
        steps += 1;
        if value == target {
            return SearchOutcome {
                index: Some(i),
                steps,
            };
        }
    }
    SearchOutcome { index: None, steps }
}

/// O(log n): halve the window each step. `values` must be sorted ascending.
pub fn binary_search<T: Ord>(values: &[T], target: &T) -> SearchOutcome {
    let mut steps = 0;
    let (mut low, mut high) = (0usize, values.len());
    while low < high {
        steps += 1;
        let mid = low + (high - low) / 2;
        match values[mid].cmp(target) {
            std::cmp::Ordering::Equal => {
                return SearchOutcome {
                    index: Some(mid),
                    steps,
                };
            }
            std::cmp::Ordering::Less => low = mid + 1,
            std::cmp::Ordering::Greater => high = mid,
        }
    }
    SearchOutcome { index: None, steps }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_at() {
        let values = [1, 2, 3, 4, 5, 6, 7, 8, 9];
        assert_eq!(element_at(&values, 4), Some(5));
        assert_eq!(element_at(&values, 9), None);
    }

    #[test]
    fn test_linear_search() {
        let values = [10, 20, 30, 40, 50];
        assert_eq!(linear_search(&values, &30).index, Some(2));
        let miss = linear_search(&values, &60);
        assert_eq!(miss.index, None);
        assert_eq!(miss.steps, values.len());
    }

    #[test]
    fn test_binary_search() {
        let values = [0, 10, 15, 20, 30, 35, 40, 50, 55, 60, 70, 75, 80, 90, 95, 100];
        assert_eq!(binary_search(&values, &70).index, Some(10));
        let miss = binary_search(&values, &25);
        assert_eq!(miss.index, None);
        // 16 elements: at most floor(log2 16) + 1 probes
        assert!(miss.steps <= 5);
        assert_eq!(binary_search::<i32>(&[], &1).index, None);
    }
}
