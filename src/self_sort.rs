use alloc::boxed::Box;

use crate::capability::{Capability, Stability};
use crate::error::{Rejection, Result};
use crate::facade::{dispatch, Sorter};
use crate::seq::NativeSort;
use crate::shape::{Probe, Receiver, Resolution, Roles, Shapes};
use crate::stable::Stable;
use crate::view::{Outcome, Sortable};

/// Prefer the container's own sort, falling back to another strategy.
///
/// The native sort serves container calls with or without a comparator. Projections and
/// iterator-pair calls always go to the fallback. The stable form only accepts a stable native
/// sort and otherwise falls back to a stabilized fallback.
#[derive(Clone)]
pub struct SelfSort {
    fallback: Box<dyn Sorter>,
    stable_only: bool,
}

impl SelfSort {
    /// Fall back to `fallback` when the input has no usable native sort.
    pub fn new(fallback: impl Sorter + 'static) -> Self {
        Self { fallback: Box::new(fallback), stable_only: false }
    }

    /// The native sort a request would use, if any.
    pub fn native_kind(&self, probe: &Probe) -> Option<NativeSort> {
        if probe.receiver != Receiver::Container || probe.roles.contains(Roles::PROJECT) {
            return None;
        }

        if self.stable_only {
            probe.native.contains(NativeSort::STABLE).then_some(NativeSort::STABLE)
        } else if probe.native.contains(NativeSort::UNSTABLE) {
            Some(NativeSort::UNSTABLE)
        } else if probe.native.contains(NativeSort::STABLE) {
            Some(NativeSort::STABLE)
        } else {
            None
        }
    }
}

impl Sorter for SelfSort {
    fn capability(&self) -> Capability {
        self.fallback.capability().self_sorting(self.stable_only)
    }

    fn shapes(&self) -> Shapes {
        Shapes::ALL
    }

    fn admit(&self, probe: &Probe) -> Result<Resolution, Rejection> {
        if self.native_kind(probe).is_none() {
            self.fallback.admit(probe)?;
        }
        Ok(Resolution::exact(probe))
    }

    fn stability_for(&self, probe: &Probe) -> Stability {
        match self.native_kind(probe) {
            Some(kind) if kind == NativeSort::STABLE => Stability::AlwaysStable,
            Some(_) => Stability::NeverStable,
            None => self.fallback.stability_for(probe),
        }
    }

    fn stable_form(&self) -> Option<Box<dyn Sorter>> {
        Some(Box::new(SelfSort {
            fallback: Box::new(Stable::from_box(self.fallback.clone())),
            stable_only: true,
        }))
    }

    fn name(&self) -> &'static str {
        if self.stable_only { "stable_self_sort" } else { "self_sort" }
    }

    fn run(&self, seq: &mut dyn Sortable) -> Result<Outcome> {
        let probe = seq.probe();

        if let Some(kind) = self.native_kind(&probe) {
            if seq.sort_natively(kind, &mut || {}) {
                log::debug!("{}: native {:?} sort", self.name(), kind);
                return Ok(Outcome::Done);
            }
        }

        log::debug!("{}: falling back to {}", self.name(), self.fallback.name());
        dispatch(&*self.fallback, seq)
    }
}
