use alloc::collections::{linked_list, vec_deque, LinkedList, VecDeque};
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::iter::{Skip, Take};
use core::ops::Range;

use bitflags::bitflags;

use crate::capability::Traversal;
use crate::list;
use crate::shape::Receiver;

bitflags! {
    /// Native in-place sorts a container exposes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NativeSort: u8 {
        /// A sort with no stability guarantee.
        const UNSTABLE = 1;
        /// A stable sort.
        const STABLE = 1 << 1;
    }
}

/// Node-relinking sorts for linked containers. Each one only moves nodes, never elements, and
/// keeps equal elements in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeSort {
    /// Insert every node after the last sorted node not greater than it.
    Insertion,
    /// Repeatedly unlink the first minimum of the unsorted nodes.
    Selection,
    /// Split in halves, sort both, and merge.
    Merge,
}

/// A collection that can be sorted in place through mutable iteration.
///
/// `iter_mut` must yield the same `len()` elements in the same order every time it is called
/// while the collection is not otherwise modified.
pub trait Sequence {
    /// Element type.
    type Item;

    /// Mutable iterator over the elements, front to back.
    type IterMut<'a>: Iterator<Item = &'a mut Self::Item>
    where
        Self: 'a;

    /// Iterate mutably over the elements.
    fn iter_mut(&mut self) -> Self::IterMut<'_>;

    /// Number of elements.
    fn len(&self) -> usize;

    /// Return true iff there are no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// How the elements can be traversed.
    fn traversal(&self) -> Traversal;

    /// How requests over this collection name it.
    fn receiver(&self) -> Receiver {
        Receiver::Container
    }

    /// Length fixed by the type, if any.
    fn fixed_len(&self) -> Option<usize> {
        None
    }

    /// Native sorts available through [`Sequence::sort_natively`].
    fn native_sorts(&self) -> NativeSort {
        NativeSort::empty()
    }

    /// Sort with the native sort of the given kind. Return false if there is none.
    fn sort_natively(
        &mut self, kind: NativeSort, compare: &mut dyn FnMut(&Self::Item, &Self::Item) -> Ordering,
    ) -> bool {
        let _ = (kind, compare);
        false
    }

    /// Return true iff [`Sequence::sort_nodes`] can relink this collection.
    fn relinks(&self) -> bool {
        false
    }

    /// Sort by relinking nodes with `algorithm`. Return false if the collection has no nodes.
    fn sort_nodes(
        &mut self, algorithm: NodeSort, compare: &mut dyn FnMut(&Self::Item, &Self::Item) -> Ordering,
    ) -> bool {
        let _ = (algorithm, compare);
        false
    }
}

// Shared native sort for contiguous storage.
fn sort_slice<T>(
    v: &mut [T], kind: NativeSort, compare: &mut dyn FnMut(&T, &T) -> Ordering,
) -> bool {
    if kind == NativeSort::STABLE {
        v.sort_by(|x, y| compare(x, y));
    } else if kind == NativeSort::UNSTABLE {
        v.sort_unstable_by(|x, y| compare(x, y));
    } else {
        return false;
    }
    true
}

impl<T> Sequence for [T] {
    type Item = T;
    type IterMut<'a> = core::slice::IterMut<'a, T> where Self: 'a;

    fn iter_mut(&mut self) -> Self::IterMut<'_> {
        <[T]>::iter_mut(self)
    }

    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn traversal(&self) -> Traversal {
        Traversal::RandomAccess
    }

    fn native_sorts(&self) -> NativeSort {
        NativeSort::all()
    }

    fn sort_natively(&mut self, kind: NativeSort, compare: &mut dyn FnMut(&T, &T) -> Ordering) -> bool {
        sort_slice(self, kind, compare)
    }
}

impl<T> Sequence for Vec<T> {
    type Item = T;
    type IterMut<'a> = core::slice::IterMut<'a, T> where Self: 'a;

    fn iter_mut(&mut self) -> Self::IterMut<'_> {
        self.as_mut_slice().iter_mut()
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn traversal(&self) -> Traversal {
        Traversal::RandomAccess
    }

    fn native_sorts(&self) -> NativeSort {
        NativeSort::all()
    }

    fn sort_natively(&mut self, kind: NativeSort, compare: &mut dyn FnMut(&T, &T) -> Ordering) -> bool {
        sort_slice(self, kind, compare)
    }
}

impl<T, const N: usize> Sequence for [T; N] {
    type Item = T;
    type IterMut<'a> = core::slice::IterMut<'a, T> where Self: 'a;

    fn iter_mut(&mut self) -> Self::IterMut<'_> {
        self.as_mut_slice().iter_mut()
    }

    fn len(&self) -> usize {
        N
    }

    fn traversal(&self) -> Traversal {
        Traversal::RandomAccess
    }

    fn fixed_len(&self) -> Option<usize> {
        Some(N)
    }

    fn native_sorts(&self) -> NativeSort {
        NativeSort::all()
    }

    fn sort_natively(&mut self, kind: NativeSort, compare: &mut dyn FnMut(&T, &T) -> Ordering) -> bool {
        sort_slice(self, kind, compare)
    }
}

impl<T> Sequence for VecDeque<T> {
    type Item = T;
    type IterMut<'a> = vec_deque::IterMut<'a, T> where Self: 'a;

    fn iter_mut(&mut self) -> Self::IterMut<'_> {
        VecDeque::iter_mut(self)
    }

    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn traversal(&self) -> Traversal {
        Traversal::RandomAccess
    }

    fn native_sorts(&self) -> NativeSort {
        NativeSort::all()
    }

    fn sort_natively(&mut self, kind: NativeSort, compare: &mut dyn FnMut(&T, &T) -> Ordering) -> bool {
        sort_slice(self.make_contiguous(), kind, compare)
    }
}

impl<T> Sequence for LinkedList<T> {
    type Item = T;
    type IterMut<'a> = linked_list::IterMut<'a, T> where Self: 'a;

    fn iter_mut(&mut self) -> Self::IterMut<'_> {
        LinkedList::iter_mut(self)
    }

    fn len(&self) -> usize {
        LinkedList::len(self)
    }

    fn traversal(&self) -> Traversal {
        Traversal::Bidirectional
    }

    fn relinks(&self) -> bool {
        true
    }

    fn sort_nodes(&mut self, algorithm: NodeSort, compare: &mut dyn FnMut(&T, &T) -> Ordering) -> bool {
        match algorithm {
            NodeSort::Insertion => list::insertion_sort(self, compare),
            NodeSort::Selection => list::selection_sort(self, compare),
            NodeSort::Merge => list::merge_sort(self, compare),
        }
        true
    }
}

/// End of a [`Span`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum End {
    /// An explicit end position.
    At(usize),
    /// A sentinel: the span runs until the underlying sequence ends.
    Sentinel,
}

/// An iterator-pair view `[start, end)` over a sequence. Requests over a span are range calls.
pub struct Span<'a, Q: Sequence + ?Sized> {
    seq: &'a mut Q,
    start: usize,
    len: usize,
    end: End,
}

impl<'a, Q: Sequence + ?Sized> Span<'a, Q> {
    /// View `seq[start..end]`, clamped to the sequence.
    pub fn new(seq: &'a mut Q, start: usize, end: End) -> Self {
        let n = seq.len();
        let stop = match end {
            End::At(e) => e.min(n),
            End::Sentinel => n,
        };
        let start = start.min(stop);
        Self { seq, start, len: stop - start, end }
    }

    /// View from `start` to a sentinel end.
    pub fn to_end(seq: &'a mut Q, start: usize) -> Self {
        Self::new(seq, start, End::Sentinel)
    }

    /// How this span was closed.
    pub fn end(&self) -> End {
        self.end
    }
}

/// View `seq[range]` as an iterator pair.
pub fn span<Q: Sequence + ?Sized>(seq: &mut Q, range: Range<usize>) -> Span<'_, Q> {
    Span::new(seq, range.start, End::At(range.end))
}

impl<Q: Sequence + ?Sized> Sequence for Span<'_, Q> {
    type Item = Q::Item;
    type IterMut<'b> = Take<Skip<Q::IterMut<'b>>> where Self: 'b;

    fn iter_mut(&mut self) -> Self::IterMut<'_> {
        self.seq.iter_mut().skip(self.start).take(self.len)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn traversal(&self) -> Traversal {
        self.seq.traversal()
    }

    fn receiver(&self) -> Receiver {
        Receiver::Range
    }
}

/// A sequence advertising no more than a given traversal.
pub struct Limit<'a, Q: Sequence + ?Sized> {
    seq: &'a mut Q,
    traversal: Traversal,
}

impl<'a, Q: Sequence + ?Sized> Limit<'a, Q> {
    /// Advertise at most `traversal`.
    pub fn new(seq: &'a mut Q, traversal: Traversal) -> Self {
        let traversal = traversal.min(seq.traversal());
        Self { seq, traversal }
    }

    /// Advertise forward traversal only.
    pub fn forward(seq: &'a mut Q) -> Self {
        Self::new(seq, Traversal::Forward)
    }

    /// Advertise bidirectional traversal at most.
    pub fn bidirectional(seq: &'a mut Q) -> Self {
        Self::new(seq, Traversal::Bidirectional)
    }
}

impl<Q: Sequence + ?Sized> Sequence for Limit<'_, Q> {
    type Item = Q::Item;
    type IterMut<'b> = Q::IterMut<'b> where Self: 'b;

    fn iter_mut(&mut self) -> Self::IterMut<'_> {
        self.seq.iter_mut()
    }

    fn len(&self) -> usize {
        self.seq.len()
    }

    fn traversal(&self) -> Traversal {
        self.traversal
    }

    fn receiver(&self) -> Receiver {
        self.seq.receiver()
    }

    fn fixed_len(&self) -> Option<usize> {
        self.seq.fixed_len()
    }

    fn native_sorts(&self) -> NativeSort {
        self.seq.native_sorts()
    }

    fn sort_natively(
        &mut self, kind: NativeSort, compare: &mut dyn FnMut(&Q::Item, &Q::Item) -> Ordering,
    ) -> bool {
        self.seq.sort_natively(kind, compare)
    }

    fn relinks(&self) -> bool {
        self.seq.relinks()
    }

    fn sort_nodes(
        &mut self, algorithm: NodeSort, compare: &mut dyn FnMut(&Q::Item, &Q::Item) -> Ordering,
    ) -> bool {
        self.seq.sort_nodes(algorithm, compare)
    }
}
