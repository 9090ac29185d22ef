use alloc::boxed::Box;

use crate::capability::{Capability, Stability};
use crate::error::{Rejection, Result, SortError};
use crate::order::{ByCompare, ByKey, Callable, Compare, Less};
use crate::seq::{NativeSort, NodeSort, Sequence};
use crate::shape::{resolve, Probe, Receiver, Resolution, Roles, Shapes};
use crate::view::{Bound, Outcome, Reshaped, Sortable};

/// A sorting strategy.
///
/// A strategy declares its [`Capability`] and the call shapes it implements natively; dispatch
/// synthesizes the rest. Adapters hold strategies as `Box<dyn Sorter>`, so implementors must be
/// [`Clone`] (see [`SorterClone`]).
pub trait Sorter: SorterClone {
    /// Traversal requirement and stability.
    fn capability(&self) -> Capability;

    /// Call shapes implemented natively. Defaults to every iterator-pair shape, which container
    /// calls reach through begin/end extraction.
    fn shapes(&self) -> Shapes {
        Shapes::RANGE_ALL
    }

    /// Decide whether a request can be served and through which native shape.
    fn admit(&self, probe: &Probe) -> Result<Resolution, Rejection> {
        let required = self.capability().traversal;
        if !probe.traversal.satisfies(required) {
            return Err(Rejection::Traversal { required, available: probe.traversal });
        }
        resolve(self.shapes(), probe.receiver, probe.roles)
    }

    /// Stability of a call described by `probe`.
    fn stability_for(&self, probe: &Probe) -> Stability {
        let _ = probe;
        self.capability().stability
    }

    /// An always-stable strategy to use in place of a tie-breaking wrapper, if one exists.
    fn stable_form(&self) -> Option<Box<dyn Sorter>> {
        None
    }

    /// Members, if this is a first-match union.
    fn hybrid_members(&self) -> Option<&[Box<dyn Sorter>]> {
        None
    }

    /// The relinking form of this strategy's algorithm, for containers that have nodes.
    fn node_sort(&self) -> Option<NodeSort> {
        None
    }

    /// Name used in errors and diagnostics.
    fn name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }

    /// Sort a request already admitted by [`Sorter::admit`].
    fn run(&self, seq: &mut dyn Sortable) -> Result<Outcome>;
}

/// Cloning support for boxed strategies.
pub trait SorterClone {
    /// Clone into a box.
    fn clone_box(&self) -> Box<dyn Sorter>;
}

impl<S: Sorter + Clone + 'static> SorterClone for S {
    fn clone_box(&self) -> Box<dyn Sorter> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn Sorter> {
    fn clone(&self) -> Self {
        (**self).clone_box()
    }
}

impl Sorter for Box<dyn Sorter> {
    fn capability(&self) -> Capability {
        (**self).capability()
    }

    fn shapes(&self) -> Shapes {
        (**self).shapes()
    }

    fn admit(&self, probe: &Probe) -> Result<Resolution, Rejection> {
        (**self).admit(probe)
    }

    fn stability_for(&self, probe: &Probe) -> Stability {
        (**self).stability_for(probe)
    }

    fn stable_form(&self) -> Option<Box<dyn Sorter>> {
        (**self).stable_form()
    }

    fn hybrid_members(&self) -> Option<&[Box<dyn Sorter>]> {
        (**self).hybrid_members()
    }

    fn node_sort(&self) -> Option<NodeSort> {
        (**self).node_sort()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn run(&self, seq: &mut dyn Sortable) -> Result<Outcome> {
        (**self).run(seq)
    }
}

/// Route a request to `sorter`: admit it, present the selected native shape, and run.
pub fn dispatch<S: Sorter + ?Sized>(sorter: &S, seq: &mut dyn Sortable) -> Result<Outcome> {
    let probe = seq.probe();
    let resolution = sorter.admit(&probe).map_err(|reason| {
        log::trace!("{}: declined {}: {}", sorter.name(), probe.shape(), reason);
        SortError::NoApplicableStrategy { strategy: sorter.name(), reason }
    })?;

    log::trace!(
        "{}: {} call over {} input resolved to {}{}",
        sorter.name(),
        probe.shape(),
        probe.traversal,
        resolution.shape,
        if resolution.embed { " (projection embedded)" } else { "" },
    );

    sorter.run(&mut Reshaped::new(seq, resolution))
}

/// The call grammar every strategy offers.
///
/// A container request passes any [`Sequence`]; an iterator-pair request passes a
/// [`crate::Span`].
pub trait SorterExt: Sorter {
    /// Sort ascending.
    fn sort<Q>(&self, seq: &mut Q) -> Result<Outcome>
    where
        Q: Sequence + ?Sized,
        Q::Item: Ord,
    {
        self.sort_by(seq, Less)
    }

    /// Sort with a comparator.
    fn sort_by<Q, C>(&self, seq: &mut Q, compare: C) -> Result<Outcome>
    where
        Q: Sequence + ?Sized,
        C: Compare<Q::Item>,
    {
        dispatch(self, &mut Bound::new(seq, ByCompare(compare)))
    }

    /// Sort ascending by projected key.
    fn sort_by_key<Q, K, P>(&self, seq: &mut Q, project: P) -> Result<Outcome>
    where
        Q: Sequence + ?Sized,
        K: Ord,
        P: FnMut(&Q::Item) -> K,
    {
        self.sort_by_key_with(seq, Less, project)
    }

    /// Sort by projected key with a key comparator.
    fn sort_by_key_with<Q, K, C, P>(&self, seq: &mut Q, compare: C, project: P) -> Result<Outcome>
    where
        Q: Sequence + ?Sized,
        C: Compare<K>,
        P: FnMut(&Q::Item) -> K,
    {
        dispatch(self, &mut Bound::new(seq, ByKey::<C, P, K>::new(compare, project)))
    }

    /// Sort with a callable that may act as a comparator or as a projection. The comparator role
    /// is tried first.
    fn sort_with<Q, F>(&self, seq: &mut Q, mut f: F) -> Result<Outcome>
    where
        Q: Sequence + ?Sized,
        F: Callable<Q::Item>,
    {
        if let Some(compare) = f.as_comparator() {
            return self.sort_by(seq, compare);
        }
        if let Some(project) = f.as_projection() {
            return self.sort_by_key(seq, project);
        }
        Err(SortError::NoApplicableStrategy { strategy: self.name(), reason: Rejection::NoRole })
    }

    /// Stability of a request over `seq` with the given roles.
    fn stability_of<Q: Sequence + ?Sized>(&self, seq: &Q, roles: Roles) -> Stability {
        let container = seq.receiver() == Receiver::Container;
        self.stability_for(&Probe {
            receiver: seq.receiver(),
            traversal: seq.traversal(),
            roles,
            len: seq.len(),
            fixed_len: if container { seq.fixed_len() } else { None },
            native: if container { seq.native_sorts() } else { NativeSort::empty() },
            relinks: container && seq.relinks(),
        })
    }
}

impl<S: Sorter + ?Sized> SorterExt for S {}

