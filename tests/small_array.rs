mod common;

use adaptsort::{
    hybrid, Counting, HeapSorter, Outcome, Rejection, SelectionSorter, SmallArray, SorterExt,
    Traversal,
};
use common::{shuffled, Marker};
use pretty_assertions::assert_eq;

fn small() -> SmallArray {
    SmallArray::new(Marker::new(Traversal::RandomAccess, 1), [8, 6, 7, 7])
}

#[test]
fn accepted_sizes_dispatch_to_inner() {
    let mut a = [0; 7];
    assert_eq!(small().sort(&mut a).unwrap(), Outcome::Value(1));

    let mut b = [0; 6];
    assert_eq!(small().sort(&mut b).unwrap(), Outcome::Value(1));
}

#[test]
fn other_sizes_are_rejected_standalone() {
    let mut a = [0; 25];
    let err = small().sort(&mut a).unwrap_err();
    assert_eq!(err.rejection(), Some(Rejection::Domain { fixed_len: Some(25) }));

    // Growable containers have no fixed length
    let mut v = vec![0; 7];
    let err = small().sort(&mut v).unwrap_err();
    assert_eq!(err.rejection(), Some(Rejection::Domain { fixed_len: None }));
}

#[test]
fn other_sizes_fall_through_inside_hybrid() {
    let sorter = hybrid![small(), Marker::new(Traversal::RandomAccess, 2)];
    assert_eq!(sorter.sort(&mut [0; 7]).unwrap(), Outcome::Value(1));
    assert_eq!(sorter.sort(&mut [0; 25]).unwrap(), Outcome::Value(2));
    assert_eq!(sorter.sort(&mut vec![0; 7]).unwrap(), Outcome::Value(2));
}

#[test]
fn iterator_pairs_are_rejected() {
    let mut a = [0; 7];
    let err = small().sort(&mut adaptsort::span(&mut a, 0..7)).unwrap_err();
    assert!(matches!(err.rejection(), Some(Rejection::CallShape(_))));
}

#[test]
fn any_size_accepts_every_array() {
    let sorter = SmallArray::any_size(HeapSorter);
    let mut a = [5, 3, 9, 1];
    sorter.sort(&mut a).unwrap();
    assert_eq!(a, [1, 3, 5, 9]);
    assert!(sorter.accepts(1000));
    assert!(!small().accepts(5));
}

#[test]
fn selection_comparisons_are_counted() {
    let mut v = shuffled(65, 51);
    let outcome = Counting::new(SelectionSorter).sort(&mut v).unwrap();
    assert_eq!(outcome, Outcome::Value(2080));
    assert_eq!(v, (0..65).collect::<Vec<_>>());

    let mut v: Vec<(i32, char)> = shuffled(80, 52).into_iter().map(|x| (x, 'x')).collect();
    let outcome = Counting::new(SelectionSorter).sort_by_key(&mut v, |p| p.0).unwrap();
    assert_eq!(outcome.value(), Some(3160));
}

#[test]
fn counting_replaces_inner_result() {
    let outcome = Counting::new(Marker::new(Traversal::Forward, 99)).sort(&mut vec![2, 1]).unwrap();
    assert_eq!(outcome, Outcome::Value(0));
}

#[test]
fn counting_sees_native_comparisons() {
    let mut v = shuffled(40, 53);
    let outcome = Counting::new(adaptsort::SelfSort::new(SelectionSorter)).sort(&mut v).unwrap();
    assert!(outcome.value().is_some_and(|n| n > 0 && n < 780));
    assert_eq!(v, (0..40).collect::<Vec<_>>());
}
