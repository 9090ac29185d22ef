#![no_std]
#![deny(missing_docs)]

//! adaptsort composes sorting strategies. A strategy declares what it needs from its input and
//! which call shapes it implements; dispatch fills in the rest, and adapters wrap strategies to
//! change what they accept or guarantee:
//!
//! | Adapter            | Effect                                             |
//! |--------------------|----------------------------------------------------|
//! | [`Hybrid`]         | first member that accepts the input wins           |
//! | [`Stable`]         | equal elements keep their order                    |
//! | [`Indirect`]       | sorts positions, then permutes once; any traversal |
//! | [`OutOfPlace`]     | sorts a moved-out buffer; any traversal            |
//! | [`Schwartz`]       | projects every element once                        |
//! | [`SelfSort`]       | prefers the container's own sort                   |
//! | [`SmallArray`]     | only fixed-size containers of chosen sizes         |
//! | [`Counting`]       | reports the number of comparisons                  |
//! | [`ContainerAware`] | relinks the nodes of linked containers             |
//!
//! Every strategy accepts the same calls through [`SorterExt`]: a container or a [`Span`], with
//! or without a comparator and a projection. For example, [`SorterExt::sort_by_key`]
//! `(&mut v, f)` sorts ascending by key, and [`SorterExt::sort_by`]`(&mut v, Greater)` sorts
//! descending.
//!
//! The free functions ([`sort`], [`sort_by`], ...) use [`default_sorter`].

extern crate alloc;

mod capability;
mod container_aware;
mod counting;
mod error;
mod facade;
mod hybrid;
mod indirect;
mod list;
mod order;
mod out_of_place;
mod schwartz;
mod self_sort;
mod seq;
mod shape;
mod small_array;
mod sorters;
mod stable;
mod view;

#[cfg(not(feature = "internal"))]
mod merge;
#[cfg(not(feature = "internal"))]
mod mini;

#[cfg(feature = "internal")]
/// Merging primitives over index-addressed inputs.
pub mod merge;
#[cfg(feature = "internal")]
/// Quadratic and heap sorts over index-addressed inputs.
pub mod mini;

pub use capability::{Capability, Stability, Traversal};
pub use container_aware::ContainerAware;
pub use counting::Counting;
pub use error::{Rejection, Result, SortError};
pub use facade::{dispatch, Sorter, SorterClone, SorterExt};
pub use hybrid::Hybrid;
pub use indirect::{sorted_indices, sorted_indices_by, Indirect};
pub use order::{AsComparator, AsProjection, Callable, Compare, Greater, Less};
pub use out_of_place::OutOfPlace;
pub use schwartz::Schwartz;
pub use self_sort::SelfSort;
pub use seq::{span, End, Limit, NativeSort, NodeSort, Sequence, Span};
pub use shape::{resolve, Probe, Receiver, Resolution, Roles, Shape, Shapes};
pub use small_array::SmallArray;
pub use sorters::{HeapSorter, InsertionSorter, MergeSorter, SelectionSorter};
pub use stable::Stable;
pub use view::{Continuation, Outcome, Sortable};

/// The general-purpose strategy, stable for every input: merge sort in place for random-access
/// inputs, by relinking for linked containers, and over collected references otherwise.
pub fn default_sorter() -> Hybrid {
    crate::hybrid![ContainerAware::new(MergeSorter), Indirect::new(MergeSorter)]
}

/// Sort `seq`.
#[inline]
pub fn sort<Q>(seq: &mut Q) -> Result<Outcome>
where
    Q: Sequence + ?Sized,
    Q::Item: Ord,
{
    default_sorter().sort(seq)
}

/// Sort `seq` with a comparator `compare`.
#[inline]
pub fn sort_by<Q, C>(seq: &mut Q, compare: C) -> Result<Outcome>
where
    Q: Sequence + ?Sized,
    C: Compare<Q::Item>,
{
    default_sorter().sort_by(seq, compare)
}

/// Sort `seq` ascending by the keys `f` maps elements to.
#[inline]
pub fn sort_by_key<Q, K, F>(seq: &mut Q, f: F) -> Result<Outcome>
where
    Q: Sequence + ?Sized,
    K: Ord,
    F: FnMut(&Q::Item) -> K,
{
    default_sorter().sort_by_key(seq, f)
}

/// Sort `seq`, keeping equal elements in order.
#[inline]
pub fn stable_sort<Q>(seq: &mut Q) -> Result<Outcome>
where
    Q: Sequence + ?Sized,
    Q::Item: Ord,
{
    Stable::new(default_sorter()).sort(seq)
}

/// Sort `seq` with a comparator `compare`, keeping equal elements in order.
#[inline]
pub fn stable_sort_by<Q, C>(seq: &mut Q, compare: C) -> Result<Outcome>
where
    Q: Sequence + ?Sized,
    C: Compare<Q::Item>,
{
    Stable::new(default_sorter()).sort_by(seq, compare)
}

/// Sort `seq` ascending by the keys `f` maps elements to, keeping equal keys in order.
#[inline]
pub fn stable_sort_by_key<Q, K, F>(seq: &mut Q, f: F) -> Result<Outcome>
where
    Q: Sequence + ?Sized,
    K: Ord,
    F: FnMut(&Q::Item) -> K,
{
    Stable::new(default_sorter()).sort_by_key(seq, f)
}
