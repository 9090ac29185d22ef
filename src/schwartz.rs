use alloc::boxed::Box;

use crate::capability::{Capability, Stability};
use crate::error::{Rejection, Result};
use crate::facade::{dispatch, Sorter};
use crate::shape::{Probe, Resolution, Roles, Shapes};
use crate::stable::Stable;
use crate::view::{Outcome, Sortable};

/// Project every element once before sorting, so each comparison reads cached keys.
///
/// Calls without a projection go straight to the inner strategy.
#[derive(Clone)]
pub struct Schwartz {
    inner: Box<dyn Sorter>,
}

impl Schwartz {
    /// Decorate `inner`.
    pub fn new(inner: impl Sorter + 'static) -> Self {
        Self::from_box(Box::new(inner))
    }

    /// Decorate an already boxed strategy.
    pub fn from_box(inner: Box<dyn Sorter>) -> Self {
        Self { inner }
    }

    // Probe the inner strategy sees.
    fn inner_probe(probe: &Probe) -> Probe {
        if probe.roles.contains(Roles::PROJECT) { probe.ranged() } else { *probe }
    }
}

impl Sorter for Schwartz {
    fn capability(&self) -> Capability {
        self.inner.capability()
    }

    fn shapes(&self) -> Shapes {
        Shapes::ALL
    }

    fn admit(&self, probe: &Probe) -> Result<Resolution, Rejection> {
        self.inner.admit(&Self::inner_probe(probe)).map(|_| Resolution::exact(probe))
    }

    fn stability_for(&self, probe: &Probe) -> Stability {
        self.inner.stability_for(&Self::inner_probe(probe))
    }

    fn stable_form(&self) -> Option<Box<dyn Sorter>> {
        Some(Box::new(Schwartz::new(Stable::from_box(self.inner.clone()))))
    }

    fn name(&self) -> &'static str {
        "schwartz"
    }

    fn run(&self, seq: &mut dyn Sortable) -> Result<Outcome> {
        if !seq.probe().roles.contains(Roles::PROJECT) {
            return dispatch(&*self.inner, seq);
        }

        let inner = &*self.inner;
        seq.cache_keys(&mut |keyed| dispatch(inner, keyed))
    }
}
