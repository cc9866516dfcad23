//! Errors reported by the data structures in this crate.
//!
//! Fallible operations return [`anyhow::Result`], carrying an [`Error`] that can be
//! recovered with [`anyhow::Error::downcast_ref()`].
//!
//! ```
//! use cpds::fenwick_trees::FenwickTree;
//! use cpds::Error;
//!
//! let mut fw = FenwickTree::<i64>::new(3);
//! let e = fw.add(4, 1).unwrap_err();
//!
//! assert_eq!(e.to_string(), "pos must be in 1..4, but got 4.");
//! assert_eq!(
//!     e.downcast_ref::<Error>(),
//!     Some(&Error::IndexOutOfRange { pos: 4, range: 1..4 })
//! );
//! ```
use std::fmt;
use std::ops::Range;

/// Error taxonomy shared by all data structures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A position or a range bound lies outside the configured extent.
    IndexOutOfRange {
        /// The offending position.
        pos: usize,
        /// Half-open range of valid positions.
        range: Range<usize>,
    },

    /// A caller-side precondition does not hold.
    InvalidPrecondition {
        /// Description of the violated precondition.
        reason: String,
    },

    /// Storage was reused for a different logical length.
    ShapeMismatch {
        /// Length the structure was built for.
        expected: usize,
        /// Length that was supplied.
        got: usize,
    },
}

impl Error {
    pub(crate) const fn out_of_range(pos: usize, range: Range<usize>) -> Self {
        Self::IndexOutOfRange { pos, range }
    }

    pub(crate) fn precondition(reason: impl Into<String>) -> Self {
        Self::InvalidPrecondition {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { pos, range } => write!(
                f,
                "pos must be in {}..{}, but got {pos}.",
                range.start, range.end
            ),
            Self::InvalidPrecondition { reason } => write!(f, "{reason}"),
            Self::ShapeMismatch { expected, got } => write!(
                f,
                "values must have length {expected}, but got {got}."
            ),
        }
    }
}

impl std::error::Error for Error {}
