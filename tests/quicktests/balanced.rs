use balanced_bst::balanced::Tree;

use std::collections::{BTreeSet, HashSet};

use crate::{init_logging, Op};

/// Applies a set of operations to a tree and a set.
/// This way we can ensure that after a random smattering of inserts,
/// deletes, and rebalances we have the same set of values in both.
fn do_ops<T>(ops: &[Op<T>], bst: &mut Tree<T>, set: &mut BTreeSet<T>)
where
    T: Ord + Clone,
{
    for op in ops {
        match op {
            Op::Insert(value) => {
                bst.insert(value.clone());
                set.insert(value.clone());
            }
            Op::Remove(value) => {
                bst.remove(value);
                set.remove(value);
            }
            Op::Rebalance => bst.rebalance(),
            Op::Traverse => {
                let inorder = bst.inorder();
                for mut other in [bst.level_order(), bst.preorder(), bst.postorder()] {
                    other.sort();
                    assert!(other == inorder, "traversals disagree on the values held");
                }
            }
        }
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(xs: Vec<i8>, ops: Vec<Op<i8>>) -> bool {
    init_logging();
    let mut tree = Tree::build(xs.clone());
    let mut set: BTreeSet<_> = xs.into_iter().collect();

    do_ops(&ops, &mut tree, &mut set);
    tree.check().is_ok() && tree.inorder().into_iter().eq(set.iter()) && tree.len() == set.len()
}

#[quickcheck]
fn build_yields_sorted_unique_values(xs: Vec<i32>) -> bool {
    let tree = Tree::build(xs.clone());
    let expected: BTreeSet<_> = xs.into_iter().collect();

    tree.inorder().into_iter().eq(expected.iter())
}

#[quickcheck]
fn build_is_balanced(xs: Vec<i32>) -> bool {
    Tree::build(xs).is_balanced()
}

#[quickcheck]
fn rebalance_is_balanced_and_stable(xs: Vec<i8>, ops: Vec<Op<i8>>) -> bool {
    init_logging();
    let mut tree = Tree::build(xs.clone());
    let mut set: BTreeSet<_> = xs.into_iter().collect();
    do_ops(&ops, &mut tree, &mut set);

    tree.rebalance();
    let first = tree.inorder().into_iter().copied().collect::<Vec<_>>();
    let first_balanced = tree.is_balanced();

    tree.rebalance();
    let second = tree.inorder().into_iter().copied().collect::<Vec<_>>();

    first_balanced
        && tree.is_balanced()
        && first == second
        && first.iter().eq(set.iter())
}

#[quickcheck]
fn traversals_hold_while_mutating(xs: Vec<i8>, ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::build(xs.clone());
    let mut set: BTreeSet<_> = xs.into_iter().collect();
    let mut ops = ops;
    ops.push(Op::Traverse);

    do_ops(&ops, &mut tree, &mut set);
    tree.preorder().len() == set.len()
}

#[quickcheck]
fn insert_then_remove_restores_members(xs: Vec<i8>, x: i8) -> bool {
    let mut tree = Tree::build(xs);
    if tree.contains(&x) {
        return true;
    }
    let before = tree.inorder().into_iter().copied().collect::<Vec<_>>();

    tree.insert(x);
    tree.remove(&x);

    tree.inorder().into_iter().eq(before.iter())
}

#[quickcheck]
fn traversals_agree_on_members(xs: Vec<i8>, ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::build(xs.clone());
    let mut set: BTreeSet<_> = xs.into_iter().collect();
    do_ops(&ops, &mut tree, &mut set);

    let as_set = |values: Vec<&i8>| values.into_iter().copied().collect::<BTreeSet<_>>();
    let expected = as_set(tree.inorder());

    expected == set
        && as_set(tree.level_order()) == set
        && as_set(tree.preorder()) == set
        && as_set(tree.postorder()) == set
        && tree.level_order().len() == set.len()
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree = Tree::build(xs.clone());

    xs.iter().all(|x| tree.find(x).map(|node| node.value()) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree = Tree::build(xs.clone());
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.find(x).is_none() && tree.depth(x).is_none())
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    init_logging();
    let mut tree = Tree::build(xs.clone());
    for delete in &deletes {
        tree.remove(delete);
    }

    let mut still_present = xs;
    for delete in &deletes {
        // We may have built from the same value multiple times - delete each one.
        while let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }

    deletes.iter().all(|x| tree.find(x).is_none())
        && still_present.iter().all(|x| tree.find(x).is_some())
}

#[quickcheck]
fn depth_matches_parent_chain(xs: Vec<i8>, inserts: Vec<i8>) -> bool {
    let mut tree = Tree::build(xs);
    for x in inserts {
        tree.insert(x);
    }

    tree.inorder().into_iter().all(|value| {
        let expected = match tree.find_parent(value) {
            None => Some(0),
            Some(parent) => tree.depth(parent.value()).map(|depth| depth + 1),
        };
        tree.depth(value) == expected
    })
}
