use crate::stop::checkpoint;

/// Insertion sort. Equal elements never pass each other, so it is stable.
pub fn insertion_sort<T: Ord>(mut values: Vec<T>) -> Vec<T> {
    for i in 1..values.len() {
        checkpoint();
        let mut j = i;
        while j > 0 && values[j] < values[j - 1] {
            values.swap(j, j - 1);
            j -= 1;
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearly_sorted() {
        assert_eq!(insertion_sort(vec![1, 2, 4, 3, 5]), vec![1, 2, 3, 4, 5]);
    }
}
