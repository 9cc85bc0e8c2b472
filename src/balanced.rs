//! A BST that is built balanced and can be rebalanced on demand. Inserts and deletes do not
//! rebalance on their own; check [`Tree::is_balanced`] and call [`Tree::rebalance`] when the
//! shape matters.
//!
//! # Examples
//!
//! ```
//! use balanced_bst::balanced::Tree;
//!
//! // Duplicates are dropped and the values are sorted before building.
//! let mut tree = Tree::build(vec![5, 1, 9, 3, 3, 7]);
//! assert_eq!(tree.inorder(), [&1, &3, &5, &7, &9]);
//! assert!(tree.is_balanced());
//!
//! tree.insert(6);
//! assert_eq!(tree.find(&6).map(|node| *node.value()), Some(6));
//!
//! // Deleting the root promotes its in-order successor.
//! tree.remove(&5);
//! assert_eq!(tree.root().map(|node| *node.value()), Some(6));
//!
//! // Deleting something that isn't there does nothing.
//! tree.remove(&42);
//! assert_eq!(tree.inorder(), [&1, &3, &6, &7, &9]);
//! ```

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::iter::FromIterator;

use log::{debug, trace};

use crate::error::Violation;

/// An optional, exclusively owned subtree.
type Link<T> = Option<Box<Node<T>>>;

/// A Binary Search Tree of unique values. Besides the nodes themselves, the tree records the set
/// of values it holds so membership questions don't need a walk.
///
/// The value type's `Ord` implementation must be a total order. Nothing here guards against one
/// that isn't; the tree's shape is simply meaningless in that case.
#[derive(Clone, Debug)]
pub struct Tree<T> {
    root: Link<T>,
    members: BTreeSet<T>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tree<T> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            root: None,
            members: BTreeSet::new(),
        }
    }

    /// Builds a balanced tree out of `values`. Duplicates are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::balanced::Tree;
    ///
    /// let tree = Tree::build(vec![4, 2, 2, 3, 1]);
    ///
    /// // The middle of `[1, 2, 3, 4]`, rounding down, is the root.
    /// assert_eq!(tree.root().map(|node| *node.value()), Some(2));
    /// assert_eq!(tree.len(), 4);
    /// ```
    pub fn build<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Ord + Clone,
    {
        let members: BTreeSet<T> = values.into_iter().collect();
        let sorted: Vec<T> = members.iter().cloned().collect();
        debug!("building tree from {} unique values", sorted.len());

        let tree = Self {
            root: build_tree(sorted),
            members,
        };
        tree.debug_check("build");
        tree
    }

    /// The root node, if the tree isn't empty.
    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    /// How many values are in the tree.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the tree holds no values at all.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether `value` is in the tree. This only consults the recorded members.
    pub fn contains(&self, value: &T) -> bool
    where
        T: Ord,
    {
        self.members.contains(value)
    }

    /// The height of the whole tree: `-1` when empty, `0` for a lone root.
    pub fn height(&self) -> isize {
        height(self.root())
    }

    /// Potentially finds the node holding `value`. If no node has it, `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::balanced::Tree;
    ///
    /// let tree = Tree::build(vec![1, 2, 3]);
    ///
    /// assert_eq!(tree.find(&3).map(|node| *node.value()), Some(3));
    /// assert!(tree.find(&42).is_none());
    /// ```
    pub fn find(&self, value: &T) -> Option<&Node<T>>
    where
        T: Ord,
    {
        if !self.members.contains(value) {
            return None;
        }
        self.root().and_then(|root| root.find(value))
    }

    /// Finds the parent of the node holding `value`. When `value` isn't in the tree this is the
    /// node a new node for `value` would be attached to. `None` means `value` is at the root or
    /// the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::balanced::Tree;
    ///
    /// let tree = Tree::build(vec![1, 3, 5, 7, 9]);
    ///
    /// assert_eq!(tree.find_parent(&7).map(|node| *node.value()), Some(5));
    /// // 6 isn't in the tree but would hang off of 7.
    /// assert_eq!(tree.find_parent(&6).map(|node| *node.value()), Some(7));
    /// assert!(tree.find_parent(&5).is_none());
    /// ```
    pub fn find_parent(&self, value: &T) -> Option<&Node<T>>
    where
        T: Ord,
    {
        self.root().and_then(|root| root.find_parent(value))
    }

    /// How many links separate the root from the node holding `value`, or `None` if `value`
    /// isn't in the tree.
    pub fn depth(&self, value: &T) -> Option<usize>
    where
        T: Ord,
    {
        let mut node = self.root()?;
        let mut depth = 0;
        loop {
            node = match value.cmp(&node.value) {
                Ordering::Less => node.left()?,
                Ordering::Equal => return Some(depth),
                Ordering::Greater => node.right()?,
            };
            depth += 1;
        }
    }

    /// Inserts `value` as a new leaf below the closest existing node. Inserting a value that is
    /// already present does nothing. The tree is not rebalanced.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::balanced::Tree;
    ///
    /// let mut tree = Tree::build(vec![1, 3, 5, 7, 9]);
    /// tree.insert(6);
    ///
    /// assert_eq!(tree.find_parent(&6).map(|node| *node.value()), Some(7));
    /// assert_eq!(tree.len(), 6);
    /// ```
    pub fn insert(&mut self, value: T)
    where
        T: Ord + Clone,
    {
        if self.members.contains(&value) {
            trace!("insert skipped: value already present");
            return;
        }

        let link = Self::parent_link(&mut self.root, &value);
        *link = Some(Box::new(Node::new(value.clone())));
        self.members.insert(value);

        self.debug_check("insert");
    }

    /// Deletes the node holding `value`. If the tree doesn't contain `value`, nothing happens.
    /// A node with two children is replaced by its in-order successor. The tree is not
    /// rebalanced.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::balanced::Tree;
    ///
    /// let mut tree = Tree::build(vec![1, 3, 5, 7, 9]);
    /// tree.remove(&5);
    ///
    /// assert_eq!(tree.root().map(|node| *node.value()), Some(7));
    /// assert_eq!(tree.inorder(), [&1, &3, &7, &9]);
    /// ```
    pub fn remove(&mut self, value: &T)
    where
        T: Ord + Clone,
    {
        if !self.members.contains(value) {
            trace!("remove skipped: value not present");
            return;
        }

        let target = self.find(value).expect("Every member has a node");
        let successor = match (target.left(), target.right()) {
            // `value` is smaller than everything on the right so the closest node found there is
            // the leftmost one.
            (Some(_), Some(right)) => right.find_parent(value).map(|node| node.value.clone()),
            _ => None,
        };

        match successor {
            Some(successor) => {
                trace!("removing a node with two children through its in-order successor");
                // The successor has no left child, so this is one of the simpler cases. It has to
                // happen before the right subtree is moved since it searches from the root.
                self.remove(&successor);
                self.members.insert(successor.clone());

                let link = Self::parent_link(&mut self.root, value);
                let mut target = link.take().expect("Removing a member implies its node");
                let mut replacement = Node {
                    value: successor,
                    left: target.left.take(),
                    right: None,
                };
                replacement.right = target.right.take();
                *link = Some(Box::new(replacement));
            }
            None => {
                let link = Self::parent_link(&mut self.root, value);
                let target = link.take().expect("Removing a member implies its node");
                let Node { left, right, .. } = *target;
                // At most one of these is populated.
                *link = left.or(right);
            }
        }
        self.members.remove(value);

        self.debug_check("remove");
    }

    /// Whether the subtrees of every node differ in height by at most one.
    pub fn is_balanced(&self) -> bool
    where
        T: Ord,
    {
        self.members.iter().all(|value| match self.find(value) {
            Some(node) => (height(node.left()) - height(node.right())).abs() <= 1,
            None => false,
        })
    }

    /// Rebuilds the tree from its sorted values so that it is balanced again.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::balanced::Tree;
    ///
    /// let mut tree = Tree::build(vec![1, 2, 3]);
    /// for value in 4..8 {
    ///     tree.insert(value);
    /// }
    /// assert!(!tree.is_balanced());
    ///
    /// tree.rebalance();
    /// assert!(tree.is_balanced());
    /// assert_eq!(tree.height(), 2);
    /// ```
    pub fn rebalance(&mut self)
    where
        T: Ord + Clone,
    {
        let old_height = self.height();
        let values: Vec<T> = self.inorder().into_iter().cloned().collect();
        self.root = build_tree(values);
        debug!(
            "rebalanced {} values, height {} -> {}",
            self.len(),
            old_height,
            self.height()
        );

        self.debug_check("rebalance");
    }

    /// Checks the BST ordering and that the recorded members are exactly the values reachable
    /// from the root. See [`Violation`] for what can be reported.
    pub fn check(&self) -> Result<(), Violation<T>>
    where
        T: Ord + Clone,
    {
        let walked = self.inorder();

        if let Some(pair) = walked.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(Violation::Unordered {
                before: T::clone(pair[0]),
                after: T::clone(pair[1]),
            });
        }
        if let Some(value) = walked.iter().find(|value| !self.members.contains(**value)) {
            return Err(Violation::Untracked(T::clone(value)));
        }
        // `walked` is sorted now so it can be searched.
        match self
            .members
            .iter()
            .find(|member| walked.binary_search(member).is_err())
        {
            Some(member) => Err(Violation::Unreachable(member.clone())),
            None => Ok(()),
        }
    }

    /// Follows the same descent as [`Node::find_parent`] starting at `link`, but hands back the
    /// parent's link toward `value` rather than the parent. That is the link holding `value` if
    /// it is present, or the empty link a node for `value` belongs in.
    fn parent_link<'a>(mut link: &'a mut Link<T>, value: &T) -> &'a mut Link<T>
    where
        T: Ord,
    {
        loop {
            // Decide with a shared borrow so `link` itself can still be handed back.
            let ordering = match link.as_deref() {
                Some(node) => value.cmp(&node.value),
                None => return link,
            };
            if ordering == Ordering::Equal {
                return link;
            }

            let node = link.as_mut().expect("Non-empty link checked above");
            link = if ordering == Ordering::Less {
                &mut node.left
            } else {
                &mut node.right
            };
        }
    }

    /// In debug builds, panics if `operation` left the tree inconsistent.
    fn debug_check(&self, operation: &str)
    where
        T: Ord + Clone,
    {
        if cfg!(debug_assertions) {
            assert!(
                self.check().is_ok(),
                "`{}` left the tree inconsistent",
                operation
            );
        }
    }
}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord + Clone,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::build(iter)
    }
}

/// Draws the tree on its side, right subtree on top.
///
/// ```
/// use balanced_bst::balanced::Tree;
///
/// let tree = Tree::build(vec![1, 2, 3]);
/// assert_eq!(tree.to_string(), "│   ┌── 3\n└── 2\n    └── 1\n");
/// ```
impl<T> fmt::Display for Tree<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root() {
            Some(root) => write_subtree(f, root, "", true),
            None => Ok(()),
        }
    }
}

fn write_subtree<T>(
    f: &mut fmt::Formatter<'_>,
    node: &Node<T>,
    prefix: &str,
    is_left: bool,
) -> fmt::Result
where
    T: fmt::Display,
{
    if let Some(right) = node.right() {
        let extension = if is_left { "│   " } else { "    " };
        write_subtree(f, right, &format!("{}{}", prefix, extension), false)?;
    }
    let branch = if is_left { "└── " } else { "┌── " };
    writeln!(f, "{}{}{}", prefix, branch, node.value)?;
    if let Some(left) = node.left() {
        let extension = if is_left { "    " } else { "│   " };
        write_subtree(f, left, &format!("{}{}", prefix, extension), true)?;
    }
    Ok(())
}

/// Builds a balanced subtree from sorted, unique `values`. The middle value (rounding down) is
/// the root, the values before it form the left subtree and the values after it the right.
fn build_tree<T>(mut values: Vec<T>) -> Link<T> {
    if values.is_empty() {
        return None;
    }

    let middle = (values.len() - 1) / 2;
    let upper = values.split_off(middle + 1);
    let value = values.pop()?;

    Some(Box::new(Node {
        value,
        left: build_tree(values),
        right: build_tree(upper),
    }))
}

/// The height of the subtree rooted at `node`. An empty subtree has a height of `-1` so that a
/// leaf has a height of `0`.
///
/// ```
/// use balanced_bst::balanced::{height, Tree};
///
/// let tree = Tree::build(vec![1, 2, 3]);
///
/// assert_eq!(height::<i32>(None), -1);
/// assert_eq!(height(tree.find(&1)), 0);
/// assert_eq!(height(tree.root()), 1);
/// ```
pub fn height<T>(node: Option<&Node<T>>) -> isize {
    match node {
        None => -1,
        Some(node) => 1 + height(node.left()).max(height(node.right())),
    }
}

/// A `Node` holds a single value of the tree and up to two children. Nodes don't know their
/// parent; [`Node::find_parent`] walks down to find one instead.
#[derive(Clone, Debug)]
pub struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Node<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    /// The value held by this node.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The root of the left subtree, holding smaller values.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The root of the right subtree, holding larger values.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// The height of the subtree rooted here. See [`height`].
    pub fn height(&self) -> isize {
        height(Some(self))
    }

    /// Finds the node holding `value` in the subtree rooted here.
    pub fn find(&self, value: &T) -> Option<&Self>
    where
        T: Ord,
    {
        match value.cmp(&self.value) {
            Ordering::Less => self.left().and_then(|n| n.find(value)),
            Ordering::Equal => Some(self),
            Ordering::Greater => self.right().and_then(|n| n.find(value)),
        }
    }

    /// Finds the parent of `value` within the subtree rooted here, or the node `value` would be
    /// attached to if it isn't in this subtree. `None` means `value` is held by this node.
    ///
    /// Searching a right subtree for a value smaller than all of it yields its leftmost node.
    pub fn find_parent(&self, value: &T) -> Option<&Self>
    where
        T: Ord,
    {
        self.find_parent_from(value, None)
    }

    fn find_parent_from<'a>(&'a self, value: &T, previous: Option<&'a Self>) -> Option<&'a Self>
    where
        T: Ord,
    {
        let next = match value.cmp(&self.value) {
            Ordering::Less => self.left(),
            Ordering::Equal => return previous,
            Ordering::Greater => self.right(),
        };
        match next {
            Some(node) => node.find_parent_from(value, Some(self)),
            None => Some(self),
        }
    }
}
