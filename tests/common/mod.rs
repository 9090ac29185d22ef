#![allow(dead_code)]

use adaptsort::{Capability, HeapSorter, Outcome, Result, Shapes, Sortable, Sorter, Stability, Traversal};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Leaves the input alone and reports `value`, so tests can see which strategy ran.
#[derive(Debug, Clone, Copy)]
pub struct Marker {
    pub traversal: Traversal,
    pub value: u64,
}

impl Marker {
    pub fn new(traversal: Traversal, value: u64) -> Self {
        Self { traversal, value }
    }
}

impl Sorter for Marker {
    fn capability(&self) -> Capability {
        Capability::new(self.traversal, Stability::NeverStable)
    }

    fn name(&self) -> &'static str {
        "marker"
    }

    fn run(&self, _: &mut dyn Sortable) -> Result<Outcome> {
        Ok(Outcome::Value(self.value))
    }
}

/// Heap sorts through a restricted set of native shapes and reports the roles it was handed.
#[derive(Debug, Clone, Copy)]
pub struct Narrow(pub Shapes);

impl Sorter for Narrow {
    fn capability(&self) -> Capability {
        HeapSorter.capability()
    }

    fn shapes(&self) -> Shapes {
        self.0
    }

    fn name(&self) -> &'static str {
        "narrow"
    }

    fn run(&self, seq: &mut dyn Sortable) -> Result<Outcome> {
        let roles = seq.probe().roles;
        HeapSorter.run(seq)?;
        Ok(Outcome::Value(roles.bits() as u64))
    }
}

/// `0..n` shuffled with a fixed seed.
pub fn shuffled(n: usize, seed: u64) -> Vec<i32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut v: Vec<i32> = (0..n as i32).collect();
    v.shuffle(&mut rng);
    v
}

/// `(key, original index)` pairs with many duplicate keys.
pub fn tagged(n: usize, keys: i32, seed: u64) -> Vec<(i32, usize)> {
    shuffled(n, seed).into_iter().enumerate().map(|(i, x)| (x % keys, i)).collect()
}

/// Return true iff equal keys appear in increasing index order.
pub fn keeps_ties(v: &[(i32, usize)]) -> bool {
    v.windows(2).all(|w| w[0].0 < w[1].0 || (w[0].0 == w[1].0 && w[0].1 < w[1].1))
}
