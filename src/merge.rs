use crate::mini::insertion_sort;
use crate::view::Sortable;

// Reverse `seq[lo..hi]`.
fn reverse(seq: &mut dyn Sortable, mut lo: usize, mut hi: usize) {
    while lo + 1 < hi {
        hi -= 1;
        seq.swap(lo, hi);
        lo += 1;
    }
}

/// Rotate `seq[lo..hi]` left by `k`.
///
/// Cost: `O(n)` swaps.
pub fn rotate(seq: &mut dyn Sortable, lo: usize, hi: usize, k: usize) {
    if k == 0 || lo + k >= hi {
        return;
    }

    reverse(seq, lo, lo + k);
    reverse(seq, lo + k, hi);
    reverse(seq, lo, hi);
}

/// Return the first position in `seq[lo..hi]` whose element does not order before the element
/// at `key`.
///
/// Cost: `O(log n)` comparisons.
pub fn lower_bound(seq: &mut dyn Sortable, mut lo: usize, mut hi: usize, key: usize) -> usize {
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if seq.less(mid, key) { lo = mid + 1 } else { hi = mid }
    }
    lo
}

/// Return the first position in `seq[lo..hi]` whose element orders after the element at `key`.
///
/// Cost: `O(log n)` comparisons.
pub fn upper_bound(seq: &mut dyn Sortable, mut lo: usize, mut hi: usize, key: usize) -> usize {
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if seq.less(key, mid) { hi = mid } else { lo = mid + 1 }
    }
    lo
}

/// Merge the sorted runs `seq[lo..mid]` and `seq[mid..hi]` in-place using rotations. Equal
/// elements of the left run stay first.
///
/// Cost: `O(m log n + m)` comparisons and `O(n m)` swaps for runs of lengths `n >= m`.
pub fn merge_in_place(seq: &mut dyn Sortable, mut lo: usize, mut mid: usize, hi: usize) {
    while lo < mid && mid < hi {
        // Skip the head of the left run that already precedes the right run
        lo = upper_bound(seq, lo, mid, mid);
        if lo == mid {
            break;
        }

        // Rotate the head of the right run that precedes `seq[lo]` in front of the left run
        let end = lower_bound(seq, mid, hi, lo);
        rotate(seq, lo, end, mid - lo);
        lo += end - mid;
        mid = end;
    }
}

/// Sort `seq` by insertion sorting evenly sized chunks and merging them bottom-up in-place.
///
/// Cost: `O(n log^2 n)` comparisons and `O(n^2)` swaps worst case; no allocation.
pub fn merge_sort(seq: &mut dyn Sortable) {
    let n = seq.len();

    // Use insertion sort for small inputs
    if n <= 64 {
        return insertion_sort(seq, 0, n);
    }

    // `0 <= i <= factor <= n <= usize::MAX`, so `n * i` fits in a u128.
    let factor = (1 << sort_util::op::log2_ceil(n / 16)) as u128;
    let bound = |i| (n as u128 * i / factor) as usize;

    let mut right = 0;
    let mut mid;
    for i in 1..=factor {
        [mid, right] = [right, bound(i)];
        insertion_sort(seq, mid, right);

        for k in 1..=i.trailing_zeros() {
            let left = bound(i - (1 << k));
            merge_in_place(seq, left, mid, right);
            mid = left;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{ByCompare, Less};
    use crate::view::Bound;
    use alloc::vec::Vec;

    fn scrambled(n: usize) -> Vec<u32> {
        // Multiplicative scramble with many duplicates
        (0..n as u32).map(|i| i.wrapping_mul(2654435761) % 97).collect()
    }

    #[test]
    fn merge_keeps_left_run_first() {
        let mut v = alloc::vec![(1, 'a'), (3, 'a'), (5, 'a'), (1, 'b'), (3, 'b'), (4, 'b')];
        let mut view = Bound::new(&mut v, ByCompare(|x: &(i32, char), y: &(i32, char)| x.0.cmp(&y.0)));
        merge_in_place(&mut view, 0, 3, 6);
        assert_eq!(v, [(1, 'a'), (1, 'b'), (3, 'a'), (3, 'b'), (4, 'b'), (5, 'a')]);
    }

    #[test]
    fn merge_sort_sorts_past_insertion_threshold() {
        for n in [0, 1, 63, 64, 65, 200, 1000] {
            let mut v = scrambled(n);
            let mut expected = v.clone();
            expected.sort();
            merge_sort(&mut Bound::new(&mut v, ByCompare(Less)));
            assert_eq!(v, expected);
        }
    }

    #[test]
    fn rotate_moves_prefix_to_back() {
        let mut v = alloc::vec![0, 1, 2, 3, 4, 5, 6];
        rotate(&mut Bound::new(&mut v, ByCompare(Less)), 1, 6, 2);
        assert_eq!(v, [0, 3, 4, 5, 1, 2, 6]);
    }
}
