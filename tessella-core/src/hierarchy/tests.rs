//! Unit tests for the partition hierarchy.

use rstest::rstest;

use super::{HierarchyError, HierarchyTree};

/// Builds the uneven fixture: the left branch splits twice, the right
/// branch terminates at the root split.
///
/// ```text
///            {0..5}
///           /      \
///      {0,1,2,3}   {4,5}
///      /       \
///   {0,1}     {2,3}
///   /   \
/// {0}   {1}
/// ```
fn uneven_tree() -> HierarchyTree {
    let (mut tree, root) = HierarchyTree::new(vec![0, 1, 2, 3, 4, 5]);
    let (left, _right) = tree
        .split(root, vec![0, 1, 2, 3], vec![4, 5])
        .expect("root split is a valid partition");
    let (inner, _) = tree
        .split(left, vec![0, 1], vec![2, 3])
        .expect("second split is a valid partition");
    tree.split(inner, vec![0], vec![1])
        .expect("third split is a valid partition");
    tree
}

#[test]
fn query_level_zero_returns_root_groups_left_then_right() {
    let (mut tree, root) = HierarchyTree::new(vec![0, 1, 2]);
    tree.split(root, vec![0, 2], vec![1])
        .expect("groups partition the root");

    assert_eq!(tree.query(0), vec![vec![0, 2], vec![1]]);
}

#[test]
fn query_on_unsplit_tree_returns_single_group() {
    let (tree, _root) = HierarchyTree::new(vec![3, 1, 4]);

    assert_eq!(tree.query(0), vec![vec![3, 1, 4]]);
    assert_eq!(tree.query(7), vec![vec![3, 1, 4]]);
}

#[rstest]
#[case(0, vec![vec![0, 1, 2, 3], vec![4, 5]])]
#[case(1, vec![vec![0, 1], vec![2, 3], vec![4, 5]])]
#[case(2, vec![vec![0], vec![1], vec![2, 3], vec![4, 5]])]
#[case(9, vec![vec![0], vec![1], vec![2, 3], vec![4, 5]])]
fn query_carries_terminated_branches_through_deeper_cuts(
    #[case] level: usize,
    #[case] expected: Vec<Vec<usize>>,
) {
    let tree = uneven_tree();

    assert_eq!(tree.query(level), expected);
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(2)]
#[case(100)]
fn every_cut_partitions_the_full_node_set(#[case] level: usize) {
    let tree = uneven_tree();

    let mut seen: Vec<usize> = tree.query(level).into_iter().flatten().collect();
    seen.sort_unstable();
    assert_eq!(seen, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn query_saturates_at_usize_max() {
    let tree = uneven_tree();

    assert_eq!(tree.query(usize::MAX).len(), 4);
}

#[test]
fn max_depth_and_leaf_count_track_growth() {
    let tree = uneven_tree();

    assert_eq!(tree.max_depth(), 3);
    assert_eq!(tree.leaf_count(), 4);
}

#[test]
fn split_rejects_stale_handle() {
    let (mut tree, root) = HierarchyTree::new(vec![0, 1]);
    tree.split(root, vec![0], vec![1])
        .expect("groups partition the root");

    let err = tree
        .split(root, vec![0], vec![1])
        .expect_err("root was already split");
    assert!(matches!(err, HierarchyError::NotALeaf { node: 0 }));
    assert_eq!(err.code().as_str(), "HIERARCHY_NOT_A_LEAF");
}

#[test]
fn split_rejects_empty_side() {
    let (mut tree, root) = HierarchyTree::new(vec![0, 1]);

    let err = tree
        .split(root, vec![0, 1], vec![])
        .expect_err("empty sides are invalid");
    assert!(matches!(err, HierarchyError::EmptyGroup));
}

#[rstest]
#[case::lost_index(vec![0], vec![1])]
#[case::invented_index(vec![0, 1], vec![2, 9])]
#[case::duplicated_index(vec![0, 1], vec![1, 2])]
fn split_rejects_groups_that_do_not_repartition(
    #[case] left: Vec<usize>,
    #[case] right: Vec<usize>,
) {
    let (mut tree, root) = HierarchyTree::new(vec![0, 1, 2]);

    let err = tree
        .split(root, left, right)
        .expect_err("groups must redistribute exactly the leaf's indices");
    assert!(matches!(err, HierarchyError::PartitionMismatch));
}

#[test]
fn leaf_indices_reports_stale_and_unknown_handles() {
    let (mut tree, root) = HierarchyTree::new(vec![0, 1]);
    let (left, _right) = tree
        .split(root, vec![0], vec![1])
        .expect("groups partition the root");

    assert_eq!(tree.leaf_indices(left).expect("left is a leaf"), &[0]);
    assert!(matches!(
        tree.leaf_indices(root),
        Err(HierarchyError::NotALeaf { .. })
    ));
}
