use crate::capability::{Capability, Stability, Traversal};
use crate::error::Result;
use crate::facade::Sorter;
use crate::merge::merge_sort;
use crate::mini::{heap_sort, insertion_sort, selection_sort};
use crate::seq::NodeSort;
use crate::view::{Outcome, Sortable};

/// Insertion sort. Stable; needs bidirectional traversal.
///
/// Cost: `O(n^2)` comparisons.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertionSorter;

impl Sorter for InsertionSorter {
    fn capability(&self) -> Capability {
        Capability::new(Traversal::Bidirectional, Stability::AlwaysStable)
    }

    fn node_sort(&self) -> Option<NodeSort> {
        Some(NodeSort::Insertion)
    }

    fn name(&self) -> &'static str {
        "insertion"
    }

    fn run(&self, seq: &mut dyn Sortable) -> Result<Outcome> {
        let n = seq.len();
        insertion_sort(seq, 0, n);
        Ok(Outcome::Done)
    }
}

/// Selection sort. Unstable; works on forward traversal.
///
/// Cost: exactly `n(n - 1)/2` comparisons.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionSorter;

impl Sorter for SelectionSorter {
    fn capability(&self) -> Capability {
        Capability::new(Traversal::Forward, Stability::NeverStable)
    }

    fn node_sort(&self) -> Option<NodeSort> {
        Some(NodeSort::Selection)
    }

    fn name(&self) -> &'static str {
        "selection"
    }

    fn run(&self, seq: &mut dyn Sortable) -> Result<Outcome> {
        selection_sort(seq);
        Ok(Outcome::Done)
    }
}

/// Heap sort. Unstable; needs random access.
///
/// Cost: `O(n log n)` comparisons.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeapSorter;

impl Sorter for HeapSorter {
    fn capability(&self) -> Capability {
        Capability::new(Traversal::RandomAccess, Stability::NeverStable)
    }

    fn name(&self) -> &'static str {
        "heap"
    }

    fn run(&self, seq: &mut dyn Sortable) -> Result<Outcome> {
        heap_sort(seq);
        Ok(Outcome::Done)
    }
}

/// In-place merge sort. Stable; needs random access; allocates nothing.
///
/// Cost: `O(n log^2 n)` comparisons.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeSorter;

impl Sorter for MergeSorter {
    fn capability(&self) -> Capability {
        Capability::new(Traversal::RandomAccess, Stability::AlwaysStable)
    }

    fn node_sort(&self) -> Option<NodeSort> {
        Some(NodeSort::Merge)
    }

    fn name(&self) -> &'static str {
        "merge"
    }

    fn run(&self, seq: &mut dyn Sortable) -> Result<Outcome> {
        merge_sort(seq);
        Ok(Outcome::Done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facade::SorterExt;
    use alloc::vec::Vec;

    fn check(sorter: &dyn Sorter) {
        let mut v: Vec<i32> = (0..150).map(|i| (i * 37 + 11) % 53 - 20).collect();
        let mut expected = v.clone();
        expected.sort();
        sorter.sort(&mut v).unwrap();
        assert_eq!(v, expected, "{}", sorter.name());
    }

    #[test]
    fn leaves_sort() {
        check(&InsertionSorter);
        check(&SelectionSorter);
        check(&HeapSorter);
        check(&MergeSorter);
    }
}
