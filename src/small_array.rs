use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::capability::{Capability, Stability};
use crate::error::{Rejection, Result};
use crate::facade::{dispatch, Sorter};
use crate::shape::{Probe, Receiver, Resolution, Shapes};
use crate::view::{Outcome, Sortable};

/// Restrict a strategy to fixed-size containers of selected sizes.
///
/// Anything else is declined, so a surrounding [`crate::Hybrid`] moves on to its next member.
#[derive(Clone)]
pub struct SmallArray {
    inner: Box<dyn Sorter>,
    sizes: Option<Vec<usize>>,
}

impl SmallArray {
    /// Accept fixed-size containers whose length is one of `sizes`.
    pub fn new(inner: impl Sorter + 'static, sizes: impl IntoIterator<Item = usize>) -> Self {
        let mut sizes: Vec<usize> = sizes.into_iter().collect();
        sizes.sort_unstable();
        sizes.dedup();
        Self { inner: Box::new(inner), sizes: Some(sizes) }
    }

    /// Accept fixed-size containers of any length.
    pub fn any_size(inner: impl Sorter + 'static) -> Self {
        Self { inner: Box::new(inner), sizes: None }
    }

    /// Return true iff a fixed length of `len` is in the domain.
    pub fn accepts(&self, len: usize) -> bool {
        match &self.sizes {
            Some(sizes) => sizes.binary_search(&len).is_ok(),
            None => true,
        }
    }
}

impl Sorter for SmallArray {
    fn capability(&self) -> Capability {
        self.inner.capability()
    }

    fn shapes(&self) -> Shapes {
        Shapes::CONTAINER_ALL
    }

    fn admit(&self, probe: &Probe) -> Result<Resolution, Rejection> {
        if probe.receiver != Receiver::Container {
            return Err(Rejection::CallShape(probe.shape()));
        }

        match probe.fixed_len {
            Some(len) if self.accepts(len) => {}
            fixed_len => return Err(Rejection::Domain { fixed_len }),
        }

        self.inner.admit(probe).map(|_| Resolution::exact(probe))
    }

    fn stability_for(&self, probe: &Probe) -> Stability {
        self.inner.stability_for(probe)
    }

    fn name(&self) -> &'static str {
        "small_array"
    }

    fn run(&self, seq: &mut dyn Sortable) -> Result<Outcome> {
        dispatch(&*self.inner, seq)
    }
}
