mod common;

use std::collections::LinkedList;
use std::panic::{self, AssertUnwindSafe};

use adaptsort::{
    span, ContainerAware, Counting, Greater, HeapSorter, InsertionSorter, Limit, MergeSorter,
    NodeSort, Outcome, Rejection, Roles, SelectionSorter, Sorter, SorterExt, Stability, Stable,
    Traversal,
};
use common::{keeps_ties, shuffled, tagged};
use pretty_assertions::assert_eq;

fn list(n: usize, seed: u64) -> LinkedList<i32> {
    shuffled(n, seed).into_iter().collect()
}

fn items(list: LinkedList<i32>) -> Vec<i32> {
    list.into_iter().collect()
}

#[test]
fn every_call_shape_over_lists() {
    let ascending: Vec<i32> = (0..187).collect();
    let descending: Vec<i32> = ascending.iter().rev().copied().collect();

    let sorters = [
        ContainerAware::new(InsertionSorter),
        ContainerAware::new(MergeSorter),
        ContainerAware::new(SelectionSorter),
    ];

    for (seed, sorter) in sorters.iter().enumerate() {
        let seed = seed as u64 * 4;

        let mut l = list(187, seed);
        sorter.sort_by(&mut l, Greater).unwrap();
        assert_eq!(items(l), descending);

        let mut l = list(187, seed + 1);
        sorter.sort_by_key(&mut l, |x| -x).unwrap();
        assert_eq!(items(l), descending);

        let mut l = list(187, seed + 2);
        sorter.sort_by_key_with(&mut l, Greater, |x| -x).unwrap();
        assert_eq!(items(l), ascending);

        // Vectors have no nodes and go to the inner strategy
        let mut v = shuffled(187, seed + 3);
        sorter.sort(&mut v).unwrap();
        assert_eq!(v, ascending);
    }
}

#[test]
fn relinking_lifts_traversal_requirement() {
    let mut l = list(50, 61);
    let err = MergeSorter.sort(&mut l).unwrap_err();
    assert!(matches!(err.rejection(), Some(Rejection::Traversal { .. })));

    let sorter = ContainerAware::new(MergeSorter);
    assert_eq!(sorter.capability().traversal, Traversal::RandomAccess);
    assert_eq!(sorter.node_sort(), Some(NodeSort::Merge));
    sorter.sort(&mut l).unwrap();
    assert_eq!(items(l), (0..50).collect::<Vec<_>>());

    // Forward-limited containers keep their nodes
    let mut l = list(50, 62);
    sorter.sort(&mut Limit::forward(&mut l)).unwrap();
    assert_eq!(items(l), (0..50).collect::<Vec<_>>());
}

#[test]
fn spans_and_strategies_without_node_form_are_not_relinked() {
    let mut l = list(10, 63);
    let err = ContainerAware::new(MergeSorter).sort(&mut span(&mut l, 0..5)).unwrap_err();
    assert!(matches!(err.rejection(), Some(Rejection::Traversal { .. })));

    let err = ContainerAware::new(HeapSorter).sort(&mut l).unwrap_err();
    assert_eq!(
        err.rejection(),
        Some(Rejection::Traversal { required: Traversal::RandomAccess, available: Traversal::Bidirectional })
    );
}

#[test]
fn relinked_selection_is_counted() {
    let mut l = list(65, 64);
    let outcome = Counting::new(ContainerAware::new(SelectionSorter)).sort(&mut l).unwrap();
    assert_eq!(outcome, Outcome::Value(2080));
    assert_eq!(items(l), (0..65).collect::<Vec<_>>());
}

#[test]
fn relinking_is_stable() {
    let sorter = ContainerAware::new(SelectionSorter);
    let l: LinkedList<(i32, usize)> = tagged(200, 6, 65).into_iter().collect();

    assert_eq!(sorter.stability_of(&l, Roles::PROJECT), Stability::AlwaysStable);
    assert_eq!(sorter.stability_of(&vec![1], Roles::PROJECT), Stability::NeverStable);

    for sorter in [sorter, ContainerAware::new(InsertionSorter), ContainerAware::new(MergeSorter)] {
        let mut l = l.clone();
        sorter.sort_by_key(&mut l, |x| x.0).unwrap();
        assert!(keeps_ties(&l.into_iter().collect::<Vec<_>>()));
    }

    // Ties are broken on positions, so nothing is relinked
    let mut l = l.clone();
    Stable::new(ContainerAware::new(SelectionSorter)).sort_by_key(&mut l, |x| x.0).unwrap();
    assert!(keeps_ties(&l.into_iter().collect::<Vec<_>>()));
}

#[test]
fn unwinding_comparator_keeps_every_node() {
    let original: Vec<String> = shuffled(60, 66).into_iter().map(|x| x.to_string()).collect();
    let mut l: LinkedList<String> = original.iter().cloned().collect();

    let mut calls = 0;
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        ContainerAware::new(MergeSorter).sort_by(&mut l, |a: &String, b: &String| {
            calls += 1;
            if calls == 150 {
                panic!("comparator failed");
            }
            a.cmp(b)
        })
    }));
    assert!(result.is_err());

    let mut seen: Vec<String> = l.into_iter().collect();
    let mut expected = original;
    seen.sort();
    expected.sort();
    assert_eq!(seen, expected);
}
