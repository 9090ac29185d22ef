use alloc::boxed::Box;

use crate::capability::{Capability, Stability};
use crate::error::{buffer, Rejection, Result};
use crate::facade::{dispatch, Sorter};
use crate::seq::{NativeSort, NodeSort};
use crate::shape::{Probe, Resolution, Shapes};
use crate::view::{Continuation, Outcome, Sortable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    // The inner strategy is stable already
    Passthrough,
    // Ties are broken on original positions
    TieBreak,
}

/// Force stability on a strategy.
///
/// An always-stable strategy, including another `Stable`, is used as is. A strategy offering a
/// [`Sorter::stable_form`] is replaced by it. Anything else sorts a view whose comparison breaks
/// ties on the original positions of the elements.
#[derive(Clone)]
pub struct Stable {
    inner: Box<dyn Sorter>,
    mode: Mode,
}

impl Stable {
    /// Stabilize `inner`.
    pub fn new(inner: impl Sorter + 'static) -> Self {
        Self::from_box(Box::new(inner))
    }

    /// Stabilize an already boxed strategy without boxing it again.
    pub fn from_box(inner: Box<dyn Sorter>) -> Self {
        let (inner, mode) = if inner.capability().stability == Stability::AlwaysStable {
            (inner, Mode::Passthrough)
        } else if let Some(form) = inner.stable_form() {
            (form, Mode::Passthrough)
        } else {
            (inner, Mode::TieBreak)
        };

        log::debug!("stable: {:?} over {}", mode, inner.name());
        Self { inner, mode }
    }

    /// Return true iff calls go straight to an always-stable strategy.
    pub fn is_passthrough(&self) -> bool {
        self.mode == Mode::Passthrough
    }

    /// The strategy doing the work.
    pub fn inner(&self) -> &dyn Sorter {
        &*self.inner
    }
}

impl Sorter for Stable {
    fn capability(&self) -> Capability {
        self.inner.capability().stabilized()
    }

    fn shapes(&self) -> Shapes {
        Shapes::ALL
    }

    fn admit(&self, probe: &Probe) -> Result<Resolution, Rejection> {
        let seen = match self.mode {
            Mode::Passthrough => *probe,
            Mode::TieBreak => Probe { native: NativeSort::empty(), relinks: false, ..*probe },
        };
        self.inner.admit(&seen).map(|_| Resolution::exact(probe))
    }

    fn stability_for(&self, _: &Probe) -> Stability {
        Stability::AlwaysStable
    }

    fn name(&self) -> &'static str {
        "stable"
    }

    fn run(&self, seq: &mut dyn Sortable) -> Result<Outcome> {
        match self.mode {
            Mode::Passthrough => dispatch(&*self.inner, seq),
            Mode::TieBreak => {
                let len = seq.len();
                let mut positions = buffer(len)?;
                positions.extend(0..len);
                dispatch(&*self.inner, &mut TieBreak { inner: seq, positions: &mut positions })
            }
        }
    }
}

// Elements paired with their original positions.
struct TieBreak<'s, 'p> {
    inner: &'s mut dyn Sortable,
    positions: &'p mut [usize],
}

impl Sortable for TieBreak<'_, '_> {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn probe(&self) -> Probe {
        // Native and relinking sorts would not see the positions
        Probe { native: NativeSort::empty(), relinks: false, ..self.inner.probe() }
    }

    fn less(&mut self, a: usize, b: usize) -> bool {
        if self.inner.less(a, b) {
            return true;
        }
        if self.inner.less(b, a) {
            return false;
        }
        matches!((self.positions.get(a), self.positions.get(b)), (Some(x), Some(y)) if x < y)
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a < self.positions.len() && b < self.positions.len() {
            self.inner.swap(a, b);
            self.positions.swap(a, b);
        }
    }

    fn sort_natively(&mut self, _: NativeSort, _: &mut dyn FnMut()) -> bool {
        false
    }

    fn sort_nodes(&mut self, _: NodeSort, _: &mut dyn FnMut()) -> bool {
        false
    }

    fn relocate(&mut self, sort: &mut Continuation<'_>) -> Result<Outcome> {
        let positions = &mut *self.positions;
        self.inner.relocate(&mut |moved| sort(&mut TieBreak { inner: moved, positions: &mut *positions }))
    }

    fn index(&mut self, sort: &mut Continuation<'_>) -> Result<Outcome> {
        let positions = &mut *self.positions;
        self.inner.index(&mut |slots| sort(&mut TieBreak { inner: slots, positions: &mut *positions }))
    }

    fn cache_keys(&mut self, sort: &mut Continuation<'_>) -> Result<Outcome> {
        let positions = &mut *self.positions;
        self.inner.cache_keys(&mut |keyed| sort(&mut TieBreak { inner: keyed, positions: &mut *positions }))
    }
}
