use alloc::collections::LinkedList;
use core::cmp::Ordering;
use core::mem;

// Lists split off `out` while sorting. Dropping splices them back, so an unwinding comparator
// leaves every element in `out`.
struct Parts<'a, T> {
    out: &'a mut LinkedList<T>,
    left: LinkedList<T>,
    right: LinkedList<T>,
}

impl<'a, T> Parts<'a, T> {
    fn split(out: &'a mut LinkedList<T>, at: usize) -> Self {
        let right = out.split_off(at);
        let left = mem::take(out);
        Self { out, left, right }
    }
}

impl<T> Drop for Parts<'_, T> {
    fn drop(&mut self) {
        self.out.append(&mut self.left);
        self.out.append(&mut self.right);
    }
}

/// Insert each node after the last sorted node not greater than it.
///
/// Cost: `O(n^2)` comparisons; each insertion unlinks and relinks a single node.
pub fn insertion_sort<T>(list: &mut LinkedList<T>, compare: &mut dyn FnMut(&T, &T) -> Ordering) {
    let mut parts = Parts::split(list, 0);

    while let Some(x) = parts.right.front() {
        let mut at = parts.out.len();
        for y in parts.out.iter().rev() {
            if compare(x, y) != Ordering::Less {
                break;
            }
            at -= 1;
        }

        let mut tail = parts.out.split_off(at);
        if let Some(x) = parts.right.pop_front() {
            parts.out.push_back(x);
        }
        parts.out.append(&mut tail);
    }
}

/// Unlink the first minimum of the unsorted nodes until none are left.
///
/// Cost: exactly `n(n - 1)/2` comparisons.
pub fn selection_sort<T>(list: &mut LinkedList<T>, compare: &mut dyn FnMut(&T, &T) -> Ordering) {
    let mut parts = Parts::split(list, 0);

    while !parts.right.is_empty() {
        let mut min = 0;
        let mut nodes = parts.right.iter().enumerate();
        if let Some((_, first)) = nodes.next() {
            let mut best = first;
            for (i, x) in nodes {
                if compare(x, best) == Ordering::Less {
                    (best, min) = (x, i);
                }
            }
        }

        let mut tail = parts.right.split_off(min);
        if let Some(x) = tail.pop_front() {
            parts.out.push_back(x);
        }
        parts.right.append(&mut tail);
    }
}

/// Split in halves, sort both, and merge them by relinking.
///
/// Cost: `O(n log n)` comparisons.
pub fn merge_sort<T>(list: &mut LinkedList<T>, compare: &mut dyn FnMut(&T, &T) -> Ordering) {
    let n = list.len();
    if n < 2 {
        return;
    }

    let mut parts = Parts::split(list, n / 2);
    merge_sort(&mut parts.left, compare);
    merge_sort(&mut parts.right, compare);

    loop {
        // Take from the right half only when strictly smaller
        let from_right = match (parts.left.front(), parts.right.front()) {
            (Some(x), Some(y)) => compare(y, x) == Ordering::Less,
            _ => break,
        };

        let next = if from_right { parts.right.pop_front() } else { parts.left.pop_front() };
        if let Some(x) = next {
            parts.out.push_back(x);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn list(keys: &[i32]) -> LinkedList<(i32, usize)> {
        keys.iter().copied().enumerate().map(|(i, k)| (k, i)).collect()
    }

    #[test]
    fn relinking_sorts_are_stable() {
        let keys: Vec<i32> = (0..90).map(|i| (i * 29 + 7) % 11).collect();
        let mut expected: Vec<(i32, usize)> = list(&keys).into_iter().collect();
        expected.sort_by_key(|p| p.0);

        let sorts: [fn(&mut LinkedList<(i32, usize)>, &mut dyn FnMut(&(i32, usize), &(i32, usize)) -> Ordering); 3] =
            [insertion_sort, selection_sort, merge_sort];
        for sort in sorts {
            let mut l = list(&keys);
            sort(&mut l, &mut |x, y| x.0.cmp(&y.0));
            assert_eq!(l.into_iter().collect::<Vec<_>>(), expected);
        }
    }

    #[test]
    fn selection_counts_exactly() {
        let mut l: LinkedList<i32> = (0..40).rev().collect();
        let mut count = 0;
        selection_sort(&mut l, &mut |x, y| {
            count += 1;
            x.cmp(y)
        });
        assert_eq!(count, 40 * 39 / 2);
        assert!(l.iter().zip(l.iter().skip(1)).all(|(a, b)| a <= b));
    }
}
