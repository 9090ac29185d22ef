use alloc::boxed::Box;

use crate::capability::{Capability, Stability};
use crate::error::{Rejection, Result};
use crate::facade::{dispatch, Sorter};
use crate::shape::{Probe, Resolution, Shapes};
use crate::view::{Outcome, Sortable};

/// Move the elements into a contiguous buffer, sort them there, and move them back.
///
/// Like [`crate::Indirect`], any input is accepted and the inner strategy sees a random-access
/// range. If the inner strategy unwinds, every element is still moved back.
#[derive(Clone)]
pub struct OutOfPlace {
    inner: Box<dyn Sorter>,
}

impl OutOfPlace {
    /// Sort through `inner`.
    pub fn new(inner: impl Sorter + 'static) -> Self {
        Self::from_box(Box::new(inner))
    }

    /// Sort through an already boxed strategy.
    pub fn from_box(inner: Box<dyn Sorter>) -> Self {
        Self { inner }
    }
}

impl Sorter for OutOfPlace {
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
        "out_of_place"
    }

    fn run(&self, seq: &mut dyn Sortable) -> Result<Outcome> {
        let inner = &*self.inner;
        seq.relocate(&mut |moved| dispatch(inner, moved))
    }
}
