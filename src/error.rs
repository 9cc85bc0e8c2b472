//! Errors reported when a [`Tree`](crate::balanced::Tree) is found in an inconsistent state.

use thiserror::Error;

/// A broken structural invariant, as reported by
/// [`Tree::check`](crate::balanced::Tree::check).
///
/// None of these can be produced through the public API as long as the value type's `Ord`
/// implementation is a total order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation<T> {
    /// An in-order walk did not yield strictly ascending values. This covers both misplaced
    /// nodes and duplicated values.
    #[error("in-order walk yields {before:?} ahead of {after:?}")]
    Unordered {
        /// The value visited first.
        before: T,
        /// The value visited right after `before`.
        after: T,
    },

    /// A node is reachable from the root but its value is not a recorded member.
    #[error("{0:?} is reachable in the tree but is not a recorded member")]
    Untracked(T),

    /// A recorded member has no node reachable from the root.
    #[error("{0:?} is a recorded member but is not reachable in the tree")]
    Unreachable(T),
}
