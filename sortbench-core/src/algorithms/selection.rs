use crate::stop::checkpoint;

/// Selection sort: swap the minimum of the unsorted suffix into place.
pub fn selection_sort<T: Ord>(mut values: Vec<T>) -> Vec<T> {
    let n = values.len();
    for i in 0..n {
        checkpoint();
        let mut min_idx = i;
        for j in (i + 1)..n {
            if values[j] < values[min_idx] {
                min_idx = j;
            }
        }
        values.swap(i, min_idx);
    }
    values
}
