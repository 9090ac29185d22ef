use alloc::boxed::Box;

use crate::capability::{Capability, Stability};
use crate::error::{Rejection, Result};
use crate::facade::{dispatch, Sorter};
use crate::seq::NodeSort;
use crate::shape::{Probe, Receiver, Resolution, Shapes};
use crate::view::{Outcome, Sortable};

/// Sort linked containers by relinking their nodes.
///
/// A container call over a collection with nodes (see [`crate::Sequence::relinks`]) runs the node
/// form of the inner strategy's algorithm, whatever traversal the inner strategy requires. Such
/// calls are stable. Everything else goes to the inner strategy unchanged.
#[derive(Clone)]
pub struct ContainerAware {
    inner: Box<dyn Sorter>,
}

impl ContainerAware {
    /// Give `inner` access to container-specific sorts.
    pub fn new(inner: impl Sorter + 'static) -> Self {
        Self::from_box(Box::new(inner))
    }

    /// Like [`ContainerAware::new`], for an already boxed strategy.
    pub fn from_box(inner: Box<dyn Sorter>) -> Self {
        Self { inner }
    }

    /// The relinking sort a request would use, if any.
    pub fn node_kind(&self, probe: &Probe) -> Option<NodeSort> {
        if probe.receiver != Receiver::Container || !probe.relinks {
            return None;
        }
        self.inner.node_sort()
    }
}

impl Sorter for ContainerAware {
    fn capability(&self) -> Capability {
        self.inner.capability()
    }

    fn shapes(&self) -> Shapes {
        Shapes::ALL
    }

    fn admit(&self, probe: &Probe) -> Result<Resolution, Rejection> {
        if self.node_kind(probe).is_none() {
            self.inner.admit(probe)?;
        }
        Ok(Resolution::exact(probe))
    }

    fn stability_for(&self, probe: &Probe) -> Stability {
        match self.node_kind(probe) {
            Some(_) => Stability::AlwaysStable,
            None => self.inner.stability_for(probe),
        }
    }

    fn node_sort(&self) -> Option<NodeSort> {
        self.inner.node_sort()
    }

    fn name(&self) -> &'static str {
        "container_aware"
    }

    fn run(&self, seq: &mut dyn Sortable) -> Result<Outcome> {
        if let Some(algorithm) = self.node_kind(&seq.probe()) {
            if seq.sort_nodes(algorithm, &mut || {}) {
                log::debug!("container_aware: relinked with {:?}", algorithm);
                return Ok(Outcome::Done);
            }
        }

        dispatch(&*self.inner, seq)
    }
}
