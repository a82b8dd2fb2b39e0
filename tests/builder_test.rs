//! Tests for TreeBuilder

use rstest::rstest;

use treebench::builder::{child_sizes, DEFAULT_FAN_OUT, VALUE_MAX, VALUE_MIN};
use treebench::util::testing;
use treebench::{TreeBuilder, TreeError, TreeNode};

fn init() {
    testing::init_test_setup();
}

/// Recount a subtree without relying on `TreeNode::node_count`.
fn count(node: &TreeNode) -> usize {
    1 + node.children().iter().map(count).sum::<usize>()
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(8)]
#[case(9)]
#[case(10)]
#[case(30)]
#[case(2_000)]
#[case(12_345)]
fn given_node_count_when_building_then_tree_has_exactly_that_many_nodes(#[case] n: usize) {
    init();
    let tree = TreeBuilder::new().build(n).unwrap();

    assert_eq!(count(&tree), n);
    assert_eq!(tree.node_count(), n);
}

#[rstest]
#[case(2)]
#[case(9)]
#[case(30)]
#[case(1_001)]
#[case(2_000)]
fn given_node_count_when_building_then_root_children_are_balanced(#[case] n: usize) {
    let tree = TreeBuilder::with_seed(11).build(n).unwrap();

    let base = (n - 1) / DEFAULT_FAN_OUT;
    let remainder = (n - 1) % DEFAULT_FAN_OUT;
    let sizes: Vec<usize> = tree.children().iter().map(TreeNode::node_count).collect();

    assert!(sizes.len() <= DEFAULT_FAN_OUT);
    assert!(sizes.iter().all(|&s| s == base || s == base + 1));
    assert_eq!(sizes.iter().filter(|&&s| s == base + 1).count(), remainder);
    assert_eq!(sizes, child_sizes(n, DEFAULT_FAN_OUT));
}

#[test]
fn given_balanced_tree_when_walking_every_node_then_subtrees_match_requested_sizes() {
    let tree = TreeBuilder::with_seed(3).build(5_000).unwrap();

    for node in tree.iter() {
        let expected = child_sizes(node.node_count(), DEFAULT_FAN_OUT);
        let actual: Vec<usize> = node.children().iter().map(TreeNode::node_count).collect();
        assert_eq!(actual, expected);
    }
}

#[test]
fn given_single_node_when_building_then_returns_leaf_with_value_in_range() {
    let tree = TreeBuilder::new().build(1).unwrap();

    assert!(tree.is_leaf());
    assert!((VALUE_MIN..VALUE_MAX).contains(&tree.value()));
}

#[test]
fn given_smoke_size_when_building_then_has_thirty_nodes_and_at_most_eight_root_children() {
    let tree = TreeBuilder::new().build(30).unwrap();

    assert_eq!(tree.node_count(), 30);
    assert!(tree.children().len() <= 8);
}

#[test]
fn given_small_tree_when_building_then_empty_slots_are_skipped() {
    let tree = TreeBuilder::with_seed(5).build(4).unwrap();

    assert_eq!(tree.children().len(), 3);
    assert!(tree.children().iter().all(TreeNode::is_leaf));
}

#[test]
fn given_two_million_nodes_when_building_then_depth_stays_logarithmic() {
    let tree = TreeBuilder::with_seed(1).build(2_000_000).unwrap();

    assert_eq!(tree.node_count(), 2_000_000);
    assert!(tree.depth() <= 8, "depth was {}", tree.depth());
}

#[test]
fn given_same_seed_when_building_twice_then_trees_are_identical() {
    let a = TreeBuilder::with_seed(42).build(2_000).unwrap();
    let b = TreeBuilder::with_seed(42).build(2_000).unwrap();

    assert_eq!(a, b);
}

#[test]
fn given_different_seeds_when_building_then_values_differ() {
    let a = TreeBuilder::with_seed(1).build(2_000).unwrap();
    let b = TreeBuilder::with_seed(2).build(2_000).unwrap();

    assert_ne!(a, b);
}

#[test]
fn given_custom_fan_out_when_building_then_root_uses_it() {
    let tree = TreeBuilder::with_seed(9).fan_out(3).build(10).unwrap();

    assert_eq!(tree.children().len(), 3);
    assert_eq!(tree.node_count(), 10);
}

#[rstest]
#[case(0)]
#[case(1)]
fn given_fan_out_below_two_when_building_large_tree_then_errors(#[case] fan_out: usize) {
    let result = TreeBuilder::with_seed(1).fan_out(fan_out).build(200_000);

    assert_eq!(result, Err(TreeError::FanOutTooSmall(fan_out)));
}

#[test]
fn given_fan_out_beyond_node_count_when_building_then_all_children_are_leaves() {
    let tree = TreeBuilder::with_seed(4).fan_out(usize::MAX).build(30).unwrap();

    assert_eq!(tree.children().len(), 29);
    assert!(tree.children().iter().all(TreeNode::is_leaf));
    assert_eq!(count(&tree), 30);
}

#[test]
fn given_zero_nodes_when_building_then_errors() {
    let result = TreeBuilder::new().build(0);

    assert_eq!(result, Err(TreeError::ZeroNodeCount));
}
