//! A set of unique values kept in a Binary Search Tree (BST) that is built
//! balanced and can be rebuilt balanced again whenever inserts and removals
//! have skewed it.
//!
//! ## Shape of the tree
//!
//! Every [`balanced::Node`] holds one value and owns up to two subtrees. All
//! values under a node's left link are smaller than its own and all values
//! under its right link are larger, so an in-order walk comes out sorted and a
//! lookup only follows one path from the root. Nodes keep no pointer back to
//! their parent. Anything that needs a parent, like removal, finds it again by
//! walking down from the root.
//!
//! The cost of that path is the tree's height. A tree built from `N` values
//! has a height of about `lg N`, but a run of ascending inserts can stretch it
//! into a chain `N` nodes long.
//!
//! ## Balancing
//!
//! A [`balanced::Tree`] gets its balanced shape from being built
//! out of a sorted list: the middle value becomes the root and each half
//! becomes a subtree, recursively. Inserts and removals do _not_ keep that
//! shape. Instead [`balanced::Tree::is_balanced`] reports whether the tree has
//! drifted and [`balanced::Tree::rebalance`] rebuilds it.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod balanced;
pub mod error;
pub mod traversal;
