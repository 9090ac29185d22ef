use alloc::vec::Vec;

use thiserror::Error;

use crate::capability::Traversal;
use crate::shape::Shape;

/// Why a strategy declined a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The input cannot be traversed the way the strategy needs.
    #[error("needs {required} traversal but the input offers {available}")]
    Traversal {
        /// Requirement of the strategy.
        required: Traversal,
        /// What the input offers.
        available: Traversal,
    },

    /// No native call shape is reachable from the request.
    #[error("no native implementation is reachable from a {0} call")]
    CallShape(Shape),

    /// The input is not a fixed-size container of an accepted size.
    #[error("fixed length {fixed_len:?} is outside the accepted sizes")]
    Domain {
        /// Fixed length of the input, if it has one.
        fixed_len: Option<usize>,
    },

    /// Every member of a union declined.
    #[error("no member accepts the request")]
    Exhausted,

    /// A callable offers neither a comparator nor a projection.
    #[error("the callable is neither a comparator nor a projection")]
    NoRole,
}

/// Errors surfaced by sorting calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortError {
    /// No strategy in the composition can serve the request.
    #[error("no applicable strategy in `{strategy}`: {reason}")]
    NoApplicableStrategy {
        /// Name of the strategy that declined.
        strategy: &'static str,
        /// Why it declined.
        reason: Rejection,
    },

    /// An auxiliary buffer could not be reserved. Nothing was moved.
    #[error("could not allocate an auxiliary buffer of {len} elements")]
    Allocation {
        /// Requested element count.
        len: usize,
    },
}

impl SortError {
    /// Return the rejection if this is a [`SortError::NoApplicableStrategy`].
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            SortError::NoApplicableStrategy { reason, .. } => Some(*reason),
            SortError::Allocation { .. } => None,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = SortError> = core::result::Result<T, E>;

// Reserve an empty buffer for exactly `len` elements.
pub(crate) fn buffer<T>(len: usize) -> Result<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len).map_err(|_| SortError::Allocation { len })?;
    Ok(v)
}
