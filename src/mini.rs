use crate::view::Sortable;

/// Sort `seq[lo..hi]` with insertion sort by adjacent swaps.
///
/// Cost: `O(n^2)` comparisons and `O(n^2)` swaps.
#[inline(never)]
pub fn insertion_sort(seq: &mut dyn Sortable, lo: usize, hi: usize) {
    for i in lo + 1..hi {
        let mut j = i;

        while j != lo && seq.less(j, j - 1) {
            seq.swap(j, j - 1);
            j -= 1;
        }
    }
}

/// Sort `seq` with selection sort.
///
/// Cost: exactly `n(n - 1)/2` comparisons and `O(n)` swaps.
#[inline(never)]
pub fn selection_sort(seq: &mut dyn Sortable) {
    let n = seq.len();

    for i in 0..n {
        let mut min = i;
        for j in i + 1..n {
            if seq.less(j, min) {
                min = j;
            }
        }

        if min != i {
            seq.swap(i, min);
        }
    }
}

/// Sort `seq` with heap sort.
///
/// Cost: `O(n log n)` comparisons and `O(n log n)` swaps.
#[inline(never)]
pub fn heap_sort(seq: &mut dyn Sortable) {
    let n = seq.len();

    (0..n / 2).rev().for_each(|i| sift_down(seq, i, n));

    for i in (1..n).rev() {
        seq.swap(0, i);
        sift_down(seq, 0, i);
    }
}

// Restore the heap property below `root` within `seq[..n]`.
fn sift_down(seq: &mut dyn Sortable, mut root: usize, n: usize) {
    loop {
        let mut child = 2 * root + 1;
        if child >= n {
            return;
        }

        if child + 1 < n {
            child += seq.less(child, child + 1) as usize;
        }

        if !seq.less(root, child) {
            return;
        }

        seq.swap(root, child);
        root = child;
    }
}
