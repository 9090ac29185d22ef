mod common;

use std::collections::LinkedList;

use adaptsort::{
    hybrid, Hybrid, InsertionSorter, Limit, MergeSorter, Rejection, Roles, SelectionSorter, Sorter,
    SorterExt, Stability, Traversal,
};
use common::{shuffled, Marker};
use pretty_assertions::assert_eq;

fn forward() -> Marker {
    Marker::new(Traversal::Forward, 1)
}

fn bidirectional() -> Marker {
    Marker::new(Traversal::Bidirectional, 2)
}

fn random_access() -> Marker {
    Marker::new(Traversal::RandomAccess, 3)
}

// Which member served each kind of input.
fn served(sorter: &Hybrid) -> [Option<u64>; 3] {
    let mut v = vec![3, 1, 2];
    let mut list: LinkedList<i32> = v.iter().copied().collect();

    [
        sorter.sort(&mut v).ok().and_then(|o| o.value()),
        sorter.sort(&mut list).ok().and_then(|o| o.value()),
        sorter.sort(&mut Limit::forward(&mut v)).ok().and_then(|o| o.value()),
    ]
}

#[test]
fn strongest_accepted_member_wins() {
    let sorter = hybrid![forward(), random_access()];
    assert_eq!(served(&sorter), [Some(3), Some(1), Some(1)]);

    // Declaration order does not matter across traversals
    let sorter = hybrid![random_access(), forward()];
    assert_eq!(served(&sorter), [Some(3), Some(1), Some(1)]);
}

#[test]
fn declaration_order_breaks_ties() {
    let first = Marker::new(Traversal::Forward, 10);
    let second = Marker::new(Traversal::Forward, 20);
    assert_eq!(served(&hybrid![first, second]), [Some(10); 3]);
    assert_eq!(served(&hybrid![second, first]), [Some(20); 3]);
}

#[test]
fn nested_hybrid_selects_like_flat_hybrid() {
    let flat = hybrid![forward(), bidirectional(), random_access()];
    let nested = hybrid![hybrid![forward(), bidirectional()], random_access()];
    let tail_nested = hybrid![forward(), hybrid![bidirectional(), random_access()]];

    assert_eq!(served(&flat), [Some(3), Some(2), Some(1)]);
    assert_eq!(served(&nested), served(&flat));
    assert_eq!(served(&tail_nested), served(&flat));
    assert_eq!(nested.members().len(), 3);
}

#[test]
fn exhausted_hybrid_is_an_error() {
    let sorter = hybrid![random_access()];
    let mut list: LinkedList<i32> = [2, 1].into_iter().collect();
    let err = sorter.sort(&mut list).unwrap_err();
    assert_eq!(err.rejection(), Some(Rejection::Exhausted));

    let empty = Hybrid::new();
    assert_eq!(empty.sort(&mut vec![1]).unwrap_err().rejection(), Some(Rejection::Exhausted));
}

#[test]
fn capability_is_aggregated() {
    let sorter = hybrid![MergeSorter, InsertionSorter];
    assert_eq!(sorter.capability().traversal, Traversal::RandomAccess);
    assert_eq!(sorter.capability().stability, Stability::AlwaysStable);

    let sorter = hybrid![MergeSorter, SelectionSorter];
    assert_eq!(sorter.capability().stability, Stability::DependsOnInput);
}

#[test]
fn stability_follows_selected_member() {
    let sorter = hybrid![MergeSorter, SelectionSorter];
    let v = vec![1, 2, 3];
    let list: LinkedList<i32> = v.iter().copied().collect();

    assert_eq!(sorter.stability_of(&v, Roles::empty()), Stability::AlwaysStable);
    assert_eq!(sorter.stability_of(&list, Roles::empty()), Stability::NeverStable);
}

#[test]
fn default_sorter_handles_every_traversal() {
    let sorter = adaptsort::default_sorter();
    let expected: Vec<i32> = (0..200).collect();

    let mut v = shuffled(200, 11);
    sorter.sort(&mut v).unwrap();
    assert_eq!(v, expected);

    let mut list: LinkedList<i32> = shuffled(200, 12).into_iter().collect();
    sorter.sort(&mut list).unwrap();
    assert_eq!(list.into_iter().collect::<Vec<_>>(), expected);

    let mut v = shuffled(200, 13);
    sorter.sort(&mut Limit::forward(&mut v)).unwrap();
    assert_eq!(v, expected);
}
