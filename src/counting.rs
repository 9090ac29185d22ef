use alloc::boxed::Box;
use core::cell::Cell;

use crate::capability::{Capability, Stability};
use crate::error::{Rejection, Result};
use crate::facade::{dispatch, Sorter};
use crate::seq::{NativeSort, NodeSort};
use crate::shape::{Probe, Resolution, Shapes};
use crate::view::{Continuation, Outcome, Sortable};

/// Count comparator invocations.
///
/// Every call returns [`Outcome::Value`] holding the count. Whatever the inner strategy returned
/// is discarded.
#[derive(Clone)]
pub struct Counting {
    inner: Box<dyn Sorter>,
}

impl Counting {
    /// Count the comparisons of `inner`.
    pub fn new(inner: impl Sorter + 'static) -> Self {
        Self::from_box(Box::new(inner))
    }

    /// Count the comparisons of an already boxed strategy.
    pub fn from_box(inner: Box<dyn Sorter>) -> Self {
        Self { inner }
    }
}

impl Sorter for Counting {
    fn capability(&self) -> Capability {
        self.inner.capability()
    }

    fn shapes(&self) -> Shapes {
        Shapes::ALL
    }

    fn admit(&self, probe: &Probe) -> Result<Resolution, Rejection> {
        self.inner.admit(probe).map(|_| Resolution::exact(probe))
    }

    fn stability_for(&self, probe: &Probe) -> Stability {
        self.inner.stability_for(probe)
    }

    fn name(&self) -> &'static str {
        "counting"
    }

    fn run(&self, seq: &mut dyn Sortable) -> Result<Outcome> {
        let count = Cell::new(0);
        dispatch(&*self.inner, &mut Tally { inner: seq, count: &count })?;
        Ok(Outcome::Value(count.get()))
    }
}

struct Tally<'s, 'c> {
    inner: &'s mut dyn Sortable,
    count: &'c Cell<u64>,
}

impl Tally<'_, '_> {
    #[inline(always)]
    fn bump(&self) {
        self.count.set(self.count.get() + 1);
    }
}

impl Sortable for Tally<'_, '_> {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn probe(&self) -> Probe {
        self.inner.probe()
    }

    fn less(&mut self, a: usize, b: usize) -> bool {
        self.bump();
        self.inner.less(a, b)
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.inner.swap(a, b)
    }

    fn sort_natively(&mut self, kind: NativeSort, observe: &mut dyn FnMut()) -> bool {
        let count = self.count;
        self.inner.sort_natively(kind, &mut || {
            count.set(count.get() + 1);
            observe();
        })
    }

    fn sort_nodes(&mut self, algorithm: NodeSort, observe: &mut dyn FnMut()) -> bool {
        let count = self.count;
        self.inner.sort_nodes(algorithm, &mut || {
            count.set(count.get() + 1);
            observe();
        })
    }

    fn relocate(&mut self, sort: &mut Continuation<'_>) -> Result<Outcome> {
        let count = self.count;
        self.inner.relocate(&mut |moved| sort(&mut Tally { inner: moved, count }))
    }

    fn index(&mut self, sort: &mut Continuation<'_>) -> Result<Outcome> {
        let count = self.count;
        self.inner.index(&mut |slots| sort(&mut Tally { inner: slots, count }))
    }

    fn cache_keys(&mut self, sort: &mut Continuation<'_>) -> Result<Outcome> {
        let count = self.count;
        self.inner.cache_keys(&mut |keyed| sort(&mut Tally { inner: keyed, count }))
    }
}
