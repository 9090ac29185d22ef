use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cmp::Reverse;

use crate::capability::{Capability, Stability};
use crate::error::{Rejection, Result, SortError};
use crate::facade::{dispatch, Sorter};
use crate::shape::{Probe, Resolution, Shapes};
use crate::stable::Stable;
use crate::view::{Outcome, Sortable};

/// A first-match union of strategies.
///
/// Each call goes to the first member that admits it. Members are tried from the strongest
/// traversal requirement the input satisfies down to the weakest, in declaration order among
/// equals, so a random-access input reaches a random-access member even if a forward member was
/// declared first. Nested unions are flattened when pushed.
///
/// ```
/// use adaptsort::{hybrid, HeapSorter, SelectionSorter, SorterExt};
///
/// let sorter = hybrid![SelectionSorter, HeapSorter];
/// let mut v = vec![3, 1, 2];
/// sorter.sort(&mut v).unwrap();
/// assert_eq!(v, [1, 2, 3]);
/// ```
#[derive(Clone, Default)]
pub struct Hybrid {
    members: Vec<Box<dyn Sorter>>,
    priority: Vec<usize>,
}

impl Hybrid {
    /// An empty union. It declines every request.
    pub fn new() -> Self {
        Self::default()
    }

    /// A union of `members` in declaration order.
    pub fn from_members(members: impl IntoIterator<Item = Box<dyn Sorter>>) -> Self {
        let mut this = Self::new();
        members.into_iter().for_each(|m| this.push(m));
        this
    }

    /// Append `sorter` as the last member.
    pub fn with(mut self, sorter: impl Sorter + 'static) -> Self {
        self.push(Box::new(sorter));
        self
    }

    /// Append `sorter`, splicing in its members if it is itself a union.
    pub fn push(&mut self, sorter: Box<dyn Sorter>) {
        match sorter.hybrid_members() {
            Some(members) => self.members.extend(members.iter().cloned()),
            None => self.members.push(sorter),
        }

        let members = &self.members;
        self.priority = (0..members.len()).collect();
        self.priority.sort_by_key(|&i| Reverse(members[i].capability().traversal));
    }

    /// Members in declaration order.
    pub fn members(&self) -> &[Box<dyn Sorter>] {
        &self.members
    }

    /// The member that would serve `probe`.
    pub fn select(&self, probe: &Probe) -> Result<&dyn Sorter, Rejection> {
        self.priority
            .iter()
            .filter_map(|&i| self.members.get(i))
            .find(|m| m.admit(probe).is_ok())
            .map(|m| &**m)
            .ok_or(Rejection::Exhausted)
    }
}

impl Sorter for Hybrid {
    fn capability(&self) -> Capability {
        Capability::hybrid(self.members.iter().map(|m| m.capability()))
    }

    fn shapes(&self) -> Shapes {
        Shapes::ALL
    }

    fn admit(&self, probe: &Probe) -> Result<Resolution, Rejection> {
        self.select(probe).map(|_| Resolution::exact(probe))
    }

    fn stability_for(&self, probe: &Probe) -> Stability {
        match self.select(probe) {
            Ok(member) => member.stability_for(probe),
            Err(_) => self.capability().stability,
        }
    }

    fn stable_form(&self) -> Option<Box<dyn Sorter>> {
        let members = self.members.iter().map(|m| Box::new(Stable::from_box(m.clone())) as Box<dyn Sorter>);
        Some(Box::new(Hybrid::from_members(members)))
    }

    fn hybrid_members(&self) -> Option<&[Box<dyn Sorter>]> {
        Some(&self.members)
    }

    fn name(&self) -> &'static str {
        "hybrid"
    }

    fn run(&self, seq: &mut dyn Sortable) -> Result<Outcome> {
        let probe = seq.probe();
        let member = self
            .select(&probe)
            .map_err(|reason| SortError::NoApplicableStrategy { strategy: self.name(), reason })?;

        log::debug!("hybrid: {} selected for {} over {} input", member.name(), probe.shape(), probe.traversal);
        dispatch(member, seq)
    }
}

/// Build a [`Hybrid`] from strategies in declaration order.
#[macro_export]
macro_rules! hybrid {
    ($($sorter:expr),* $(,)?) => {
        $crate::Hybrid::new()$(.with($sorter))*
    };
}
