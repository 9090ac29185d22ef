use core::fmt;

/// The iteration capability a strategy needs from its input, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Traversal {
    /// Single pass, front to back.
    Forward,
    /// Stepping both ways.
    Bidirectional,
    /// Constant-time access to any position.
    RandomAccess,
}

impl Traversal {
    /// Return true iff an input with this traversal can feed a strategy requiring `required`.
    #[inline]
    pub fn satisfies(self, required: Traversal) -> bool {
        self >= required
    }
}

impl fmt::Display for Traversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Traversal::Forward => "forward",
            Traversal::Bidirectional => "bidirectional",
            Traversal::RandomAccess => "random-access",
        })
    }
}

/// Whether equal elements keep their relative order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stability {
    /// Equal elements always keep their order.
    AlwaysStable,
    /// No guarantee for any input.
    NeverStable,
    /// Decided per call by the input (see [`crate::Sorter::stability_for`]).
    DependsOnInput,
}

impl Stability {
    /// Combine the stabilities of two alternatives of which exactly one runs.
    #[inline]
    pub fn join(self, other: Stability) -> Stability {
        if self == other { self } else { Stability::DependsOnInput }
    }
}

impl fmt::Display for Stability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stability::AlwaysStable => "always stable",
            Stability::NeverStable => "never stable",
            Stability::DependsOnInput => "input-dependent",
        })
    }
}

/// Static facts a strategy advertises: its traversal requirement and its stability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capability {
    /// Minimum traversal the input must offer.
    pub traversal: Traversal,
    /// Stability classification.
    pub stability: Stability,
}

impl Capability {
    /// Construct a capability.
    pub const fn new(traversal: Traversal, stability: Stability) -> Self {
        Self { traversal, stability }
    }

    /// Capability of a first-match union: the traversal of the member a random-access input would
    /// select (the strongest requirement), and the joined stabilities. Weaker inputs skip members
    /// at call time, so admission itself is decided per member.
    ///
    /// An empty union requires nothing and is vacuously stable.
    pub fn hybrid(members: impl IntoIterator<Item = Capability>) -> Self {
        let mut members = members.into_iter();
        let Some(first) = members.next() else {
            return Self::new(Traversal::Forward, Stability::AlwaysStable);
        };

        members.fold(first, |acc, c| Self {
            traversal: acc.traversal.max(c.traversal),
            stability: acc.stability.join(c.stability),
        })
    }

    /// Capability after forcing stability.
    #[inline]
    pub fn stabilized(self) -> Self {
        Self { stability: Stability::AlwaysStable, ..self }
    }

    /// Capability after moving the work onto a random-access buffer built in one forward pass.
    #[inline]
    pub fn relaxed(self) -> Self {
        Self { traversal: Traversal::Forward, ..self }
    }

    /// Capability of a strategy that may defer to the input's native sort.
    #[inline]
    pub fn self_sorting(self, stable_only: bool) -> Self {
        Self {
            stability: if stable_only { Stability::AlwaysStable } else { Stability::DependsOnInput },
            ..self
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.traversal, self.stability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RA_STABLE: Capability = Capability::new(Traversal::RandomAccess, Stability::AlwaysStable);
    const FWD_UNSTABLE: Capability = Capability::new(Traversal::Forward, Stability::NeverStable);

    #[test]
    fn traversal_is_a_total_order() {
        assert!(Traversal::RandomAccess.satisfies(Traversal::Forward));
        assert!(Traversal::Bidirectional.satisfies(Traversal::Bidirectional));
        assert!(!Traversal::Forward.satisfies(Traversal::RandomAccess));
        assert!(!Traversal::Bidirectional.satisfies(Traversal::RandomAccess));
    }

    #[test]
    fn hybrid_advertises_strongest_member() {
        let c = Capability::hybrid([FWD_UNSTABLE, RA_STABLE]);
        assert_eq!(c.traversal, Traversal::RandomAccess);
        assert_eq!(c.stability, Stability::DependsOnInput);

        let c = Capability::hybrid([RA_STABLE, RA_STABLE]);
        assert_eq!(c, RA_STABLE);
    }

    #[test]
    fn adapters_rewrite_one_field() {
        assert_eq!(FWD_UNSTABLE.stabilized().traversal, Traversal::Forward);
        assert_eq!(FWD_UNSTABLE.stabilized().stability, Stability::AlwaysStable);
        assert_eq!(RA_STABLE.relaxed(), Capability::new(Traversal::Forward, Stability::AlwaysStable));
        assert_eq!(RA_STABLE.self_sorting(false).stability, Stability::DependsOnInput);
    }
}
