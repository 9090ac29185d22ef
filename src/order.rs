use alloc::vec::Vec;
use core::cmp::Ordering;
use core::marker::PhantomData;

use crate::shape::Roles;

/// A comparison function over keys of type `K`.
///
/// Every `FnMut(&K, &K) -> Ordering` is a comparator. [`Less`] is the default comparator and is
/// recognized as such by dispatch.
pub trait Compare<K: ?Sized> {
    /// Compare `a` with `b`.
    fn compare(&mut self, a: &K, b: &K) -> Ordering;

    /// Return true iff this is the default ascending order.
    fn is_default(&self) -> bool {
        false
    }
}

impl<K: ?Sized, F: FnMut(&K, &K) -> Ordering> Compare<K> for F {
    #[inline(always)]
    fn compare(&mut self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}

/// Ascending order by [`Ord`]. This is the default comparator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Less;

impl<K: Ord + ?Sized> Compare<K> for Less {
    #[inline(always)]
    fn compare(&mut self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }

    fn is_default(&self) -> bool {
        true
    }
}

/// Descending order by [`Ord`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Greater;

impl<K: Ord + ?Sized> Compare<K> for Greater {
    #[inline(always)]
    fn compare(&mut self, a: &K, b: &K) -> Ordering {
        b.cmp(a)
    }
}

/// A callable whose role is resolved at the call site: comparator first, projection otherwise.
///
/// Implement whichever views the type supports; the other stays `None`.
pub trait Callable<T> {
    /// Key produced when acting as a projection.
    type Key: Ord;

    /// View as a comparator.
    fn as_comparator(&mut self) -> Option<&mut dyn FnMut(&T, &T) -> Ordering> {
        None
    }

    /// View as a projection.
    fn as_projection(&mut self) -> Option<&mut dyn FnMut(&T) -> Self::Key> {
        None
    }
}

/// Tag a closure as a comparator for [`crate::SorterExt::sort_with`].
pub struct AsComparator<F>(pub F);

impl<T, F: FnMut(&T, &T) -> Ordering> Callable<T> for AsComparator<F> {
    type Key = ();

    fn as_comparator(&mut self) -> Option<&mut dyn FnMut(&T, &T) -> Ordering> {
        Some(&mut self.0)
    }
}

/// Tag a closure as a projection for [`crate::SorterExt::sort_with`].
pub struct AsProjection<F, K>(F, PhantomData<fn() -> K>);

impl<F, K> AsProjection<F, K> {
    /// Wrap `f`.
    pub fn new(f: F) -> Self {
        Self(f, PhantomData)
    }
}

impl<T, K: Ord, F: FnMut(&T) -> K> Callable<T> for AsProjection<F, K> {
    type Key = K;

    fn as_projection(&mut self) -> Option<&mut dyn FnMut(&T) -> K> {
        Some(&mut self.0)
    }
}

// Comparator and projection fused into a single element order.
pub(crate) trait Order<T> {
    // Projected key type, and the comparator that orders keys.
    type Key;
    type KeyCompare: Compare<Self::Key>;

    fn compare(&mut self, a: &T, b: &T) -> Ordering;

    fn roles(&self) -> Roles;

    // Project every element once. `None` if this order has no projection.
    fn keys(
        &mut self, items: &mut dyn Iterator<Item = &mut T>, len: usize,
    ) -> crate::Result<Option<Vec<Self::Key>>>;

    fn key_compare(&mut self) -> &mut Self::KeyCompare;
}

// Orders nothing. Views that only move elements carry it.
#[derive(Default)]
pub(crate) struct Unordered(Less);

impl<T> Order<T> for Unordered {
    type Key = ();
    type KeyCompare = Less;

    fn compare(&mut self, _: &T, _: &T) -> Ordering {
        Ordering::Equal
    }

    fn roles(&self) -> Roles {
        Roles::empty()
    }

    fn keys(&mut self, _: &mut dyn Iterator<Item = &mut T>, _: usize) -> crate::Result<Option<Vec<()>>> {
        Ok(None)
    }

    fn key_compare(&mut self) -> &mut Less {
        &mut self.0
    }
}

// Order by a comparator over whole elements.
pub(crate) struct ByCompare<C>(pub C);

impl<T, C: Compare<T>> Order<T> for ByCompare<C> {
    type Key = T;
    type KeyCompare = C;

    #[inline(always)]
    fn compare(&mut self, a: &T, b: &T) -> Ordering {
        self.0.compare(a, b)
    }

    fn roles(&self) -> Roles {
        if self.0.is_default() { Roles::empty() } else { Roles::COMPARE }
    }

    fn keys(&mut self, _: &mut dyn Iterator<Item = &mut T>, _: usize) -> crate::Result<Option<Vec<T>>> {
        Ok(None)
    }

    fn key_compare(&mut self) -> &mut C {
        &mut self.0
    }
}

// Order by a comparator over projected keys.
pub(crate) struct ByKey<C, P, K> {
    compare: C,
    project: P,
    _key: PhantomData<fn() -> K>,
}

impl<C, P, K> ByKey<C, P, K> {
    pub fn new(compare: C, project: P) -> Self {
        Self { compare, project, _key: PhantomData }
    }
}

impl<T, K, C: Compare<K>, P: FnMut(&T) -> K> Order<T> for ByKey<C, P, K> {
    type Key = K;
    type KeyCompare = C;

    #[inline(always)]
    fn compare(&mut self, a: &T, b: &T) -> Ordering {
        let (x, y) = ((self.project)(a), (self.project)(b));
        self.compare.compare(&x, &y)
    }

    fn roles(&self) -> Roles {
        if self.compare.is_default() { Roles::PROJECT } else { Roles::COMPARE | Roles::PROJECT }
    }

    fn keys(
        &mut self, items: &mut dyn Iterator<Item = &mut T>, len: usize,
    ) -> crate::Result<Option<Vec<K>>> {
        let mut keys = crate::error::buffer(len)?;
        for x in items.take(len) {
            keys.push((self.project)(&*x));
        }
        Ok(Some(keys))
    }

    fn key_compare(&mut self) -> &mut C {
        &mut self.compare
    }
}
