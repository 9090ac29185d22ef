use core::fmt;

use bitflags::bitflags;

use crate::capability::Traversal;
use crate::error::Rejection;
use crate::seq::NativeSort;

/// How a request names its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Receiver {
    /// A whole container, which may expose a native sort and a fixed length.
    Container,
    /// An iterator pair (explicit end or sentinel).
    Range,
}

bitflags! {
    /// Arguments a caller supplied beyond the defaults. The default comparator and the identity
    /// projection are never recorded.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Roles: u8 {
        /// A comparator other than [`crate::Less`].
        const COMPARE = 1;
        /// A projection other than the identity.
        const PROJECT = 1 << 1;
    }
}

/// One call shape: a receiver plus the roles supplied with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    /// Container or iterator pair.
    pub receiver: Receiver,
    /// Comparator and projection presence.
    pub roles: Roles,
}

impl Shape {
    /// Construct a shape.
    pub const fn new(receiver: Receiver, roles: Roles) -> Self {
        Self { receiver, roles }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self.receiver {
            Receiver::Container => "container",
            Receiver::Range => "range",
        })?;

        match (self.roles.contains(Roles::COMPARE), self.roles.contains(Roles::PROJECT)) {
            (false, false) => Ok(()),
            (true, false) => f.write_str(" with comparator"),
            (false, true) => f.write_str(" with projection"),
            (true, true) => f.write_str(" with comparator and projection"),
        }
    }
}

bitflags! {
    /// The set of call shapes a strategy implements natively.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Shapes: u8 {
        /// `(first, last)`
        const RANGE = 1;
        /// `(first, last, compare)`
        const RANGE_COMPARE = 1 << 1;
        /// `(first, last, projection)`
        const RANGE_PROJECT = 1 << 2;
        /// `(first, last, compare, projection)`
        const RANGE_COMPARE_PROJECT = 1 << 3;
        /// `(container)`
        const CONTAINER = 1 << 4;
        /// `(container, compare)`
        const CONTAINER_COMPARE = 1 << 5;
        /// `(container, projection)`
        const CONTAINER_PROJECT = 1 << 6;
        /// `(container, compare, projection)`
        const CONTAINER_COMPARE_PROJECT = 1 << 7;

        /// Every iterator-pair shape.
        const RANGE_ALL = 0x0f;
        /// Every container shape.
        const CONTAINER_ALL = 0xf0;
        /// Everything.
        const ALL = 0xff;
    }
}

impl From<Shape> for Shapes {
    fn from(shape: Shape) -> Self {
        let offset = match shape.receiver {
            Receiver::Range => 0,
            Receiver::Container => 4,
        };
        Shapes::from_bits_retain(1 << (shape.roles.bits() + offset))
    }
}

/// Outcome of matching a request against a strategy's native shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// The native shape that will be invoked.
    pub shape: Shape,
    /// Roles visible to the callee.
    pub roles: Roles,
    /// Whether the projection was folded into the comparator.
    pub embed: bool,
}

impl Resolution {
    /// A resolution that forwards the request untouched.
    pub fn exact(probe: &Probe) -> Self {
        Self { shape: probe.shape(), roles: probe.roles, embed: false }
    }
}

const NONE: Roles = Roles::empty();
const C: Roles = Roles::COMPARE;
const P: Roles = Roles::PROJECT;
const CP: Roles = Roles::COMPARE.union(Roles::PROJECT);

// Ordered native-role candidates for each request; `true` marks projection embedding.
fn candidates(roles: Roles) -> &'static [(Roles, bool)] {
    match (roles.contains(C), roles.contains(P)) {
        (false, false) => &[(NONE, false), (C, false), (P, false), (CP, false)],
        (true, false) => &[(C, false), (CP, false)],
        (false, true) => &[(P, false), (CP, false), (C, true)],
        (true, true) => &[(CP, false), (C, true)],
    }
}

/// Find the most specific native shape reachable from a request.
///
/// Exact argument matches win over supplied defaults, which win over embedding the projection
/// into the comparator. For each candidate a container request prefers the container shape and
/// then falls back to the iterator-pair shape. An iterator-pair request never reaches a container
/// shape.
pub fn resolve(native: Shapes, receiver: Receiver, roles: Roles) -> Result<Resolution, Rejection> {
    let receivers: &[Receiver] = match receiver {
        Receiver::Container => &[Receiver::Container, Receiver::Range],
        Receiver::Range => &[Receiver::Range],
    };

    for &(candidate, embed) in candidates(roles) {
        for &receiver in receivers {
            let shape = Shape::new(receiver, candidate);
            if native.contains(shape.into()) {
                let roles = if embed { Roles::COMPARE } else { roles };
                return Ok(Resolution { shape, roles, embed });
            }
        }
    }

    Err(Rejection::CallShape(Shape::new(receiver, roles)))
}

/// A snapshot of everything dispatch needs to know about a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Probe {
    /// Container or iterator pair.
    pub receiver: Receiver,
    /// What the input offers.
    pub traversal: Traversal,
    /// Supplied comparator and projection.
    pub roles: Roles,
    /// Number of elements.
    pub len: usize,
    /// Length fixed by the container type, if any.
    pub fixed_len: Option<usize>,
    /// Native sorts the container exposes.
    pub native: NativeSort,
    /// The container can be sorted by relinking its nodes.
    pub relinks: bool,
}

impl Probe {
    /// The request's call shape.
    #[inline]
    pub fn shape(&self) -> Shape {
        Shape::new(self.receiver, self.roles)
    }

    /// The probe as seen by the callee of `resolution`. Container-only facts disappear when the
    /// call is forwarded as an iterator pair.
    pub fn reshaped(self, resolution: &Resolution) -> Self {
        let seen = Self { roles: resolution.roles, ..self };
        match resolution.shape.receiver {
            Receiver::Container => seen,
            Receiver::Range => seen.ranged(),
        }
    }

    /// The same request reached through an iterator pair.
    pub fn ranged(self) -> Self {
        Self {
            receiver: Receiver::Range,
            fixed_len: None,
            native: NativeSort::empty(),
            relinks: false,
            ..self
        }
    }

    /// The probe of a random-access buffer holding the same request.
    pub fn buffered(self) -> Self {
        Self { traversal: Traversal::RandomAccess, ..self.ranged() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(native: Shapes, receiver: Receiver, roles: Roles) -> (Shape, bool) {
        let r = resolve(native, receiver, roles).unwrap();
        (r.shape, r.embed)
    }

    #[test]
    fn exact_match_wins() {
        for bits in 0..4 {
            let roles = Roles::from_bits_retain(bits);
            let (shape, embed) = hit(Shapes::ALL, Receiver::Range, roles);
            assert_eq!(shape, Shape::new(Receiver::Range, roles));
            assert!(!embed);
        }
    }

    #[test]
    fn projection_only_reached_from_plain_call() {
        let (shape, _) = hit(Shapes::RANGE_PROJECT, Receiver::Range, NONE);
        assert_eq!(shape.roles, P);
    }

    #[test]
    fn mixed_native_beats_embedding() {
        let native = Shapes::RANGE_COMPARE | Shapes::RANGE_COMPARE_PROJECT;
        let (shape, embed) = hit(native, Receiver::Range, P);
        assert_eq!(shape.roles, CP);
        assert!(!embed);
    }

    #[test]
    fn projection_embedded_into_comparator() {
        let r = resolve(Shapes::RANGE_COMPARE, Receiver::Range, CP).unwrap();
        assert!(r.embed);
        assert_eq!(r.roles, C);

        let r = resolve(Shapes::RANGE_COMPARE, Receiver::Range, P).unwrap();
        assert!(r.embed);
    }

    #[test]
    fn comparator_request_never_drops_comparator() {
        assert_eq!(
            resolve(Shapes::RANGE | Shapes::RANGE_PROJECT, Receiver::Range, C),
            Err(Rejection::CallShape(Shape::new(Receiver::Range, C)))
        );
    }

    #[test]
    fn container_prefers_container_native() {
        let (shape, _) = hit(Shapes::ALL, Receiver::Container, C);
        assert_eq!(shape.receiver, Receiver::Container);

        let (shape, _) = hit(Shapes::RANGE_ALL, Receiver::Container, C);
        assert_eq!(shape.receiver, Receiver::Range);
    }

    #[test]
    fn range_never_reaches_container_native() {
        assert!(resolve(Shapes::CONTAINER_ALL, Receiver::Range, NONE).is_err());
    }

    #[test]
    fn reshaped_probe_hides_container_facts() {
        let probe = Probe {
            receiver: Receiver::Container,
            traversal: Traversal::RandomAccess,
            roles: NONE,
            len: 7,
            fixed_len: Some(7),
            native: NativeSort::all(),
            relinks: true,
        };

        let r = resolve(Shapes::RANGE, Receiver::Container, NONE).unwrap();
        let seen = probe.reshaped(&r);
        assert_eq!(seen.receiver, Receiver::Range);
        assert_eq!(seen.fixed_len, None);
        assert!(seen.native.is_empty());
        assert!(!seen.relinks);
    }
}
