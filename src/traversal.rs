//! The four classical walks over a [`Tree`]. Each order comes in two flavours: one that returns
//! the values in that order, and a `visit_*` one that hands every node to a callback instead.
//!
//! The walks use explicit stacks and queues rather than recursion, so walking a degenerate chain
//! doesn't grow the call stack. Other operations (`height`, `find`, `Clone`, dropping) still
//! recurse to the tree's depth.
//!
//! # Examples
//!
//! ```
//! use balanced_bst::balanced::Tree;
//!
//! let tree = Tree::build(1..=7);
//!
//! assert_eq!(tree.level_order(), [&4, &2, &6, &1, &3, &5, &7]);
//! assert_eq!(tree.preorder(), [&4, &2, &1, &3, &6, &5, &7]);
//! assert_eq!(tree.inorder(), [&1, &2, &3, &4, &5, &6, &7]);
//! assert_eq!(tree.postorder(), [&1, &3, &2, &5, &7, &6, &4]);
//!
//! let mut leaves = 0;
//! tree.visit_postorder(|node| {
//!     if node.is_leaf() {
//!         leaves += 1;
//!     }
//! });
//! assert_eq!(leaves, 4);
//! ```

use std::collections::VecDeque;

use crate::balanced::{Node, Tree};

impl<T> Tree<T> {
    /// The values breadth first: the root, then its children left to right, then their
    /// children, and so on.
    pub fn level_order(&self) -> Vec<&T> {
        let mut values = Vec::new();
        self.visit_level_order(|node| {
            if let Some(node) = node {
                values.push(node.value());
            }
        });
        values
    }

    /// Calls `visit` on each node breadth first. An empty tree is visited once, with `None`.
    pub fn visit_level_order<'a>(&'a self, mut visit: impl FnMut(Option<&'a Node<T>>)) {
        let mut queue = VecDeque::new();
        queue.push_back(self.root());

        while let Some(node) = queue.pop_front() {
            visit(node);

            if let Some(node) = node {
                if let Some(left) = node.left() {
                    queue.push_back(Some(left));
                }
                if let Some(right) = node.right() {
                    queue.push_back(Some(right));
                }
            }
        }
    }

    /// The values with every node before its left subtree, and its left subtree before its
    /// right.
    pub fn preorder(&self) -> Vec<&T> {
        let mut values = Vec::new();
        self.visit_preorder(|node| values.push(node.value()));
        values
    }

    /// Calls `visit` on each node in preorder.
    pub fn visit_preorder<'a>(&'a self, mut visit: impl FnMut(&'a Node<T>)) {
        let mut stack: Vec<&Node<T>> = self.root().into_iter().collect();

        while let Some(node) = stack.pop() {
            visit(node);

            // Right goes on first so the left subtree comes off first.
            stack.extend(node.right());
            stack.extend(node.left());
        }
    }

    /// The values in ascending order.
    pub fn inorder(&self) -> Vec<&T> {
        let mut values = Vec::new();
        self.visit_inorder(|node| values.push(node.value()));
        values
    }

    /// Calls `visit` on each node in ascending order of their values.
    pub fn visit_inorder<'a>(&'a self, mut visit: impl FnMut(&'a Node<T>)) {
        let mut stack = Vec::new();
        push_left(&mut stack, self.root());

        while let Some(node) = stack.pop() {
            visit(node);
            push_left(&mut stack, node.right());
        }
    }

    /// The values with both subtrees, left first, before their root.
    pub fn postorder(&self) -> Vec<&T> {
        let mut values = Vec::new();
        self.visit_postorder(|node| values.push(node.value()));
        values
    }

    /// Calls `visit` on each node in postorder.
    pub fn visit_postorder<'a>(&'a self, mut visit: impl FnMut(&'a Node<T>)) {
        let mut pending: Vec<&Node<T>> = self.root().into_iter().collect();
        // Filled root, right, left, so popping it yields left, right, root.
        let mut emitted = Vec::new();

        while let Some(node) = pending.pop() {
            emitted.push(node);
            pending.extend(node.left());
            pending.extend(node.right());
        }

        while let Some(node) = emitted.pop() {
            visit(node);
        }
    }
}

/// Pushes `node` and the whole chain of left children below it.
fn push_left<'a, T>(stack: &mut Vec<&'a Node<T>>, mut node: Option<&'a Node<T>>) {
    while let Some(current) = node {
        stack.push(current);
        node = current.left();
    }
}
