use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::capability::{Capability, Stability};
use crate::error::{buffer, Rejection, Result};
use crate::facade::{dispatch, Sorter};
use crate::order::{ByCompare, Compare, Less};
use crate::seq::{NativeSort, NodeSort, Sequence};
use crate::shape::{Probe, Resolution, Shapes};
use crate::view::{Bound, Continuation, Outcome, Sortable};

/// Sort a permutation of positions, then apply it.
///
/// References to the elements are collected in one forward pass, so any input is accepted. The
/// inner strategy sees a random-access range of positions whatever its own requirement, and
/// every comparison and every swap of the final permutation costs constant time.
#[derive(Clone)]
pub struct Indirect {
    inner: Box<dyn Sorter>,
}

impl Indirect {
    /// Sort through `inner`.
    pub fn new(inner: impl Sorter + 'static) -> Self {
        Self::from_box(Box::new(inner))
    }

    /// Sort through an already boxed strategy.
    pub fn from_box(inner: Box<dyn Sorter>) -> Self {
        Self { inner }
    }
}

impl Sorter for Indirect {
    fn capability(&self) -> Capability {
        self.inner.capability().relaxed()
    }

    fn shapes(&self) -> Shapes {
        Shapes::ALL
    }

    fn admit(&self, probe: &Probe) -> Result<Resolution, Rejection> {
        self.inner.admit(&probe.buffered()).map(|_| Resolution::exact(probe))
    }

    fn stability_for(&self, probe: &Probe) -> Stability {
        self.inner.stability_for(&probe.buffered())
    }

    fn name(&self) -> &'static str {
        "indirect"
    }

    fn run(&self, seq: &mut dyn Sortable) -> Result<Outcome> {
        let inner = &*self.inner;
        seq.index(&mut |slots| {
            let mut perm = identity(slots.len())?;
            let outcome = dispatch(inner, &mut Indices { base: &mut *slots, perm: &mut perm })?;
            apply(slots, &mut perm);
            Ok(outcome)
        })
    }
}

fn identity(len: usize) -> Result<Vec<usize>> {
    let mut perm = buffer(len)?;
    perm.extend(0..len);
    Ok(perm)
}

/// Move the element at `perm[i]` to position `i` for every `i`, following cycles. `perm` is left
/// as the identity.
///
/// Cost: `O(n)` swaps.
fn apply(seq: &mut dyn Sortable, perm: &mut [usize]) {
    for start in 0..perm.len() {
        let mut current = start;
        loop {
            let next = perm[current];
            perm[current] = current;
            if next == start || next == current {
                break;
            }
            seq.swap(current, next);
            current = next;
        }
    }
}

// A random-access range of positions into `base`.
struct Indices<'s, 'p> {
    base: &'s mut dyn Sortable,
    perm: &'p mut [usize],
}

impl Sortable for Indices<'_, '_> {
    fn len(&self) -> usize {
        self.perm.len()
    }

    fn probe(&self) -> Probe {
        self.base.probe().buffered()
    }

    fn less(&mut self, a: usize, b: usize) -> bool {
        match (self.perm.get(a), self.perm.get(b)) {
            (Some(&x), Some(&y)) => self.base.less(x, y),
            _ => false,
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a < self.perm.len() && b < self.perm.len() {
            self.perm.swap(a, b);
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
        let perm = &mut *self.perm;
        self.base.index(&mut |slots| sort(&mut Indices { base: slots, perm: &mut *perm }))
    }

    fn cache_keys(&mut self, sort: &mut Continuation<'_>) -> Result<Outcome> {
        let perm = &mut *self.perm;
        self.base.cache_keys(&mut |keyed| sort(&mut Indices { base: keyed, perm: &mut *perm }))
    }
}

/// Return the positions of the elements of `seq` in ascending order, as sorted by `sorter`. `seq`
/// is not modified.
pub fn sorted_indices<S, Q>(sorter: &S, seq: &mut Q) -> Result<Vec<usize>>
where
    S: Sorter + ?Sized,
    Q: Sequence + ?Sized,
    Q::Item: Ord,
{
    sorted_indices_by(sorter, seq, Less)
}

/// Like [`sorted_indices`], with a comparator.
pub fn sorted_indices_by<S, Q, C>(sorter: &S, seq: &mut Q, compare: C) -> Result<Vec<usize>>
where
    S: Sorter + ?Sized,
    Q: Sequence + ?Sized,
    C: Compare<Q::Item>,
{
    let mut perm = Vec::new();
    Bound::new(seq, ByCompare(compare)).index(&mut |slots| {
        perm = identity(slots.len())?;
        dispatch(sorter, &mut Indices { base: slots, perm: &mut perm })
    })?;
    Ok(perm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn apply_follows_cycles() {
        let mut v = vec!['c', 'a', 'd', 'b'];
        let mut perm = vec![1, 3, 0, 2];
        apply(&mut Bound::new(&mut v, ByCompare(Less)), &mut perm);
        assert_eq!(v, ['a', 'b', 'c', 'd']);
        assert_eq!(perm, [0, 1, 2, 3]);
    }
}
