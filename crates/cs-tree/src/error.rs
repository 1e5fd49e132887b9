//! Error types for tree surgery.

/// Error from a split or wrap operation.
///
/// Every variant is recoverable: callers skip the operation for the node
/// at hand and continue the pass. A failed operation never leaves the
/// tree partially mutated.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum TreeError {
    /// The node has no parent (root or already detached); there is no
    /// sibling slot to splice results into.
    #[error("cannot split a node without a parent")]
    SplitDetached,

    /// Split index past the node's value or child-list length.
    #[error("split index {index} out of range for length {len}")]
    SplitOutOfRange {
        /// Requested index.
        index: usize,
        /// Length of the value or child list.
        len: usize,
    },

    /// Split index inside a multi-byte character.
    #[error("split index {index} is not a character boundary")]
    SplitOffBoundary {
        /// Requested index.
        index: usize,
    },

    /// Comment nodes have no splittable content.
    #[error("comment nodes cannot be split")]
    SplitComment,

    /// Wrap called with an empty node run.
    #[error("wrap requires at least one node")]
    WrapEmpty,

    /// Wrap targets do not all share one parent.
    #[error("wrap targets do not share a single parent")]
    NotSiblings,

    /// Wrap targets are not the parent's contiguous, in-order child run.
    #[error("wrap targets are not a contiguous in-order child run")]
    NotContiguous,
}
