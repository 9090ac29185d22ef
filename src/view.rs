use alloc::vec::Vec;
use core::cmp::Ordering;
use core::{mem, ptr};

use crate::error::{buffer, Result};
use crate::order::{Compare, Order, Unordered};
use crate::seq::{NativeSort, NodeSort, Sequence};
use crate::shape::{Probe, Receiver, Resolution, Roles};

/// The optional result value of a sorting call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Sorted; nothing to report.
    #[default]
    Done,
    /// Sorted, with a value reported by the strategy.
    Value(u64),
}

impl Outcome {
    /// The reported value, if any.
    pub fn value(self) -> Option<u64> {
        match self {
            Outcome::Done => None,
            Outcome::Value(v) => Some(v),
        }
    }
}

/// A sorting step run over a view prepared by [`Sortable::relocate`] or
/// [`Sortable::cache_keys`].
pub type Continuation<'a> = dyn FnMut(&mut dyn Sortable) -> Result<Outcome> + 'a;

/// A request bound to its input: positions `0..len()` ordered by the request's comparator and
/// projection.
///
/// Strategies only see this interface. `less` calls the user comparator exactly once.
pub trait Sortable {
    /// Number of elements.
    fn len(&self) -> usize;

    /// Return true iff there are no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Describe the request.
    fn probe(&self) -> Probe;

    /// Return true iff the element at `a` orders before the element at `b`.
    fn less(&mut self, a: usize, b: usize) -> bool;

    /// Exchange the elements at `a` and `b`.
    fn swap(&mut self, a: usize, b: usize);

    /// Run the container's native sort of the given kind, calling `observe` once per comparison.
    /// Return false if there is none.
    fn sort_natively(&mut self, kind: NativeSort, observe: &mut dyn FnMut()) -> bool;

    /// Relink the container's nodes with `algorithm`, calling `observe` once per comparison.
    /// Return false if the container has no nodes to relink.
    fn sort_nodes(&mut self, algorithm: NodeSort, observe: &mut dyn FnMut()) -> bool;

    /// Move every element into a contiguous random-access buffer, run `sort` over it, and move
    /// the elements back, also on unwind.
    fn relocate(&mut self, sort: &mut Continuation<'_>) -> Result<Outcome>;

    /// Collect a reference to every element in one pass and run `sort` over a view addressing
    /// them in constant time. Swaps through the view exchange the elements themselves.
    fn index(&mut self, sort: &mut Continuation<'_>) -> Result<Outcome>;

    /// Project every element once and run `sort` over a view comparing the cached keys. Without
    /// a projection `sort` runs over `self`.
    fn cache_keys(&mut self, sort: &mut Continuation<'_>) -> Result<Outcome>;
}

enum Pair<'a, T> {
    One(&'a mut T),
    Two(&'a mut T, &'a mut T),
}

// Fetch positions `a` and `b` in one pass.
fn pair<Q: Sequence + ?Sized>(seq: &mut Q, a: usize, b: usize) -> Option<Pair<'_, Q::Item>> {
    if a == b {
        return seq.iter_mut().nth(a).map(Pair::One);
    }

    let (lo, hi) = (a.min(b), a.max(b));
    let mut it = seq.iter_mut();
    let x = it.nth(lo)?;
    let y = it.nth(hi - lo - 1)?;
    Some(if a < b { Pair::Two(x, y) } else { Pair::Two(y, x) })
}

// Elements moved out of a sequence. Dropping writes them back into their slots.
struct Buffer<'a, T> {
    slots: Vec<&'a mut T>,
    items: Vec<T>,
}

impl<'a, T> Buffer<'a, T> {
    fn take(iter: impl Iterator<Item = &'a mut T>, len: usize) -> Result<Self> {
        let mut slots = buffer(len)?;
        slots.extend(iter.take(len));
        let items = buffer(slots.len())?;

        let mut this = Self { slots, items };
        for slot in this.slots.iter() {
            // Capacity is reserved, so the push cannot unwind between read and record
            this.items.push(unsafe { ptr::read(&**slot) });
        }
        Ok(this)
    }
}

impl<T> Drop for Buffer<'_, T> {
    fn drop(&mut self) {
        // The slots hold stale copies; overwrite them without dropping
        unsafe {
            for (slot, item) in self.slots.iter_mut().zip(self.items.iter()) {
                ptr::copy_nonoverlapping(item, &mut **slot, 1);
            }
            self.items.set_len(0);
        }
    }
}

// A typed sequence together with its order.
pub(crate) struct Bound<'s, Q: Sequence + ?Sized, O> {
    seq: &'s mut Q,
    order: O,
    receiver: Receiver,
    len: usize,
}

impl<'s, Q: Sequence + ?Sized, O: Order<Q::Item>> Bound<'s, Q, O> {
    pub fn new(seq: &'s mut Q, order: O) -> Self {
        let (receiver, len) = (seq.receiver(), seq.len());
        Self { seq, order, receiver, len }
    }
}

impl<Q: Sequence + ?Sized, O: Order<Q::Item>> Sortable for Bound<'_, Q, O> {
    fn len(&self) -> usize {
        self.len
    }

    fn probe(&self) -> Probe {
        let container = self.receiver == Receiver::Container;
        Probe {
            receiver: self.receiver,
            traversal: self.seq.traversal(),
            roles: self.order.roles(),
            len: self.len,
            fixed_len: if container { self.seq.fixed_len() } else { None },
            native: if container { self.seq.native_sorts() } else { NativeSort::empty() },
            relinks: container && self.seq.relinks(),
        }
    }

    fn less(&mut self, a: usize, b: usize) -> bool {
        let order = &mut self.order;
        match pair(&mut *self.seq, a, b) {
            Some(Pair::One(x)) => order.compare(&*x, &*x) == Ordering::Less,
            Some(Pair::Two(x, y)) => order.compare(x, y) == Ordering::Less,
            None => false,
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        if let Some(Pair::Two(x, y)) = pair(&mut *self.seq, a, b) {
            mem::swap(x, y);
        }
    }

    fn sort_natively(&mut self, kind: NativeSort, observe: &mut dyn FnMut()) -> bool {
        if self.receiver != Receiver::Container {
            return false;
        }

        let order = &mut self.order;
        self.seq.sort_natively(kind, &mut |x, y| {
            observe();
            order.compare(x, y)
        })
    }

    fn sort_nodes(&mut self, algorithm: NodeSort, observe: &mut dyn FnMut()) -> bool {
        if self.receiver != Receiver::Container {
            return false;
        }

        let order = &mut self.order;
        self.seq.sort_nodes(algorithm, &mut |x, y| {
            observe();
            order.compare(x, y)
        })
    }

    fn relocate(&mut self, sort: &mut Continuation<'_>) -> Result<Outcome> {
        let probe = self.probe().buffered();
        let mut moved = Buffer::take(self.seq.iter_mut(), self.len)?;
        sort(&mut Moved { items: &mut moved.items[..], order: &mut self.order, probe })
    }

    fn index(&mut self, sort: &mut Continuation<'_>) -> Result<Outcome> {
        let probe = self.probe().buffered();
        let mut slots: Vec<&mut Q::Item> = buffer(self.len)?;
        slots.extend(self.seq.iter_mut().take(self.len));
        sort(&mut Slots { slots: &mut slots[..], order: &mut self.order, probe })
    }

    fn cache_keys(&mut self, sort: &mut Continuation<'_>) -> Result<Outcome> {
        let roles = self.order.roles();
        let keys = self.order.keys(&mut self.seq.iter_mut(), self.len)?;
        let Some(mut keys) = keys else {
            return sort(self);
        };

        let mut base = Bound {
            seq: &mut *self.seq,
            order: Unordered::default(),
            receiver: Receiver::Range,
            len: self.len,
        };
        sort(&mut Keyed { base: &mut base, keys: &mut keys, compare: self.order.key_compare(), roles })
    }
}

// Elements moved into a contiguous buffer, ordered like the sequence they came from.
struct Moved<'s, T, O> {
    items: &'s mut [T],
    order: &'s mut O,
    probe: Probe,
}

impl<T, O: Order<T>> Sortable for Moved<'_, T, O> {
    fn len(&self) -> usize {
        self.items.len()
    }

    fn probe(&self) -> Probe {
        self.probe
    }

    fn less(&mut self, a: usize, b: usize) -> bool {
        match (self.items.get(a), self.items.get(b)) {
            (Some(x), Some(y)) => self.order.compare(x, y) == Ordering::Less,
            _ => false,
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a < self.items.len() && b < self.items.len() {
            self.items.swap(a, b);
        }
    }

    fn sort_natively(&mut self, _: NativeSort, _: &mut dyn FnMut()) -> bool {
        false
    }

    fn sort_nodes(&mut self, _: NodeSort, _: &mut dyn FnMut()) -> bool {
        false
    }

    fn relocate(&mut self, sort: &mut Continuation<'_>) -> Result<Outcome> {
        sort(self)
    }

    fn index(&mut self, sort: &mut Continuation<'_>) -> Result<Outcome> {
        sort(self)
    }

    fn cache_keys(&mut self, sort: &mut Continuation<'_>) -> Result<Outcome> {
        let (roles, len) = (self.order.roles(), self.items.len());
        let keys = self.order.keys(&mut self.items.iter_mut(), len)?;
        let Some(mut keys) = keys else {
            return sort(self);
        };

        let mut unordered = Unordered::default();
        let mut base = Moved { items: &mut *self.items, order: &mut unordered, probe: self.probe };
        sort(&mut Keyed { base: &mut base, keys: &mut keys, compare: self.order.key_compare(), roles })
    }
}

// One reference per element of a sequence, collected in a single pass.
struct Slots<'s, 'e, T, O> {
    slots: &'s mut [&'e mut T],
    order: &'s mut O,
    probe: Probe,
}

impl<T, O: Order<T>> Sortable for Slots<'_, '_, T, O> {
    fn len(&self) -> usize {
        self.slots.len()
    }

    fn probe(&self) -> Probe {
        self.probe
    }

    fn less(&mut self, a: usize, b: usize) -> bool {
        match (self.slots.get(a), self.slots.get(b)) {
            (Some(x), Some(y)) => self.order.compare(&**x, &**y) == Ordering::Less,
            _ => false,
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        let (lo, hi) = (a.min(b), a.max(b));
        if lo == hi || hi >= self.slots.len() {
            return;
        }

        let (left, right) = self.slots.split_at_mut(hi);
        mem::swap(&mut *left[lo], &mut *right[0]);
    }

    fn sort_natively(&mut self, _: NativeSort, _: &mut dyn FnMut()) -> bool {
        false
    }

    fn sort_nodes(&mut self, _: NodeSort, _: &mut dyn FnMut()) -> bool {
        false
    }

    fn relocate(&mut self, sort: &mut Continuation<'_>) -> Result<Outcome> {
        let len = self.slots.len();
        let mut moved = Buffer::take(self.slots.iter_mut().map(|slot| &mut **slot), len)?;
        sort(&mut Moved { items: &mut moved.items[..], order: &mut *self.order, probe: self.probe })
    }

    fn index(&mut self, sort: &mut Continuation<'_>) -> Result<Outcome> {
        sort(self)
    }

    fn cache_keys(&mut self, sort: &mut Continuation<'_>) -> Result<Outcome> {
        let (roles, len) = (self.order.roles(), self.slots.len());
        let keys = self.order.keys(&mut self.slots.iter_mut().map(|slot| &mut **slot), len)?;
        let Some(mut keys) = keys else {
            return sort(self);
        };

        let mut unordered = Unordered::default();
        let mut base = Slots { slots: &mut *self.slots, order: &mut unordered, probe: self.probe };
        sort(&mut Keyed { base: &mut base, keys: &mut keys, compare: self.order.key_compare(), roles })
    }
}

// Elements paired with precomputed keys; swaps move both.
struct Keyed<'s, K, C> {
    base: &'s mut dyn Sortable,
    keys: &'s mut [K],
    compare: &'s mut C,
    roles: Roles,
}

impl<K, C: Compare<K>> Sortable for Keyed<'_, K, C> {
    fn len(&self) -> usize {
        self.keys.len()
    }

    fn probe(&self) -> Probe {
        Probe { roles: self.roles, ..self.base.probe().ranged() }
    }

    fn less(&mut self, a: usize, b: usize) -> bool {
        match (self.keys.get(a), self.keys.get(b)) {
            (Some(x), Some(y)) => self.compare.compare(x, y) == Ordering::Less,
            _ => false,
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a < self.keys.len() && b < self.keys.len() {
            self.base.swap(a, b);
            self.keys.swap(a, b);
        }
    }

    fn sort_natively(&mut self, _: NativeSort, _: &mut dyn FnMut()) -> bool {
        false
    }

    fn sort_nodes(&mut self, _: NodeSort, _: &mut dyn FnMut()) -> bool {
        false
    }

    fn relocate(&mut self, sort: &mut Continuation<'_>) -> Result<Outcome> {
        let (keys, compare, roles) = (&mut *self.keys, &mut *self.compare, self.roles);
        self.base.relocate(&mut |moved| {
            sort(&mut Keyed { base: moved, keys: &mut *keys, compare: &mut *compare, roles })
        })
    }

    fn index(&mut self, sort: &mut Continuation<'_>) -> Result<Outcome> {
        let (keys, compare, roles) = (&mut *self.keys, &mut *self.compare, self.roles);
        self.base.index(&mut |slots| {
            sort(&mut Keyed { base: slots, keys: &mut *keys, compare: &mut *compare, roles })
        })
    }

    fn cache_keys(&mut self, sort: &mut Continuation<'_>) -> Result<Outcome> {
        sort(self)
    }
}

// A view presenting the shape a resolution selected.
pub(crate) struct Reshaped<'s> {
    inner: &'s mut dyn Sortable,
    resolution: Resolution,
}

impl<'s> Reshaped<'s> {
    pub fn new(inner: &'s mut dyn Sortable, resolution: Resolution) -> Self {
        Self { inner, resolution }
    }

    // Buffers and key views are iterator pairs.
    fn ranged(&self) -> Resolution {
        let mut resolution = self.resolution;
        resolution.shape.receiver = Receiver::Range;
        resolution
    }
}

impl Sortable for Reshaped<'_> {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn probe(&self) -> Probe {
        self.inner.probe().reshaped(&self.resolution)
    }

    fn less(&mut self, a: usize, b: usize) -> bool {
        self.inner.less(a, b)
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.inner.swap(a, b)
    }

    fn sort_natively(&mut self, kind: NativeSort, observe: &mut dyn FnMut()) -> bool {
        self.resolution.shape.receiver == Receiver::Container
            && self.inner.sort_natively(kind, observe)
    }

    fn sort_nodes(&mut self, algorithm: NodeSort, observe: &mut dyn FnMut()) -> bool {
        self.resolution.shape.receiver == Receiver::Container
            && self.inner.sort_nodes(algorithm, observe)
    }

    fn relocate(&mut self, sort: &mut Continuation<'_>) -> Result<Outcome> {
        let resolution = self.ranged();
        self.inner.relocate(&mut |moved| sort(&mut Reshaped::new(moved, resolution)))
    }

    fn index(&mut self, sort: &mut Continuation<'_>) -> Result<Outcome> {
        let resolution = self.ranged();
        self.inner.index(&mut |slots| sort(&mut Reshaped::new(slots, resolution)))
    }

    fn cache_keys(&mut self, sort: &mut Continuation<'_>) -> Result<Outcome> {
        let resolution = self.ranged();
        self.inner.cache_keys(&mut |keyed| sort(&mut Reshaped::new(keyed, resolution)))
    }
}
