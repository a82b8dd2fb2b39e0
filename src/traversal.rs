//! Threshold search over a [`TreeNode`] in two allocation styles.
//!
//! Both variants return every value strictly greater than the threshold and
//! agree on the multiset of values. They differ in emission order:
//! [`find_immutable`] appends a node's own value after its descendants'
//! matches, [`find_mutable`] pushes it before visiting the children.

use std::fmt;

use crate::tree::TreeNode;

/// Builds a fresh `Vec` per subtree and concatenates child results.
pub fn find_immutable(threshold: i64, tree: &TreeNode) -> Vec<u32> {
    let mut found: Vec<u32> = tree
        .children()
        .iter()
        .flat_map(|child| find_immutable(threshold, child))
        .collect();
    if i64::from(tree.value()) > threshold {
        found.push(tree.value());
    }
    found
}

/// Collects matches into a single buffer owned by this call.
pub fn find_mutable(threshold: i64, tree: &TreeNode) -> Vec<u32> {
    let mut results = Vec::new();
    find_mutable_into(threshold, tree, &mut results);
    results
}

/// Appends the matches of `tree` to `results`, node before children.
pub fn find_mutable_into(threshold: i64, tree: &TreeNode, results: &mut Vec<u32>) {
    if i64::from(tree.value()) > threshold {
        results.push(tree.value());
    }
    for child in tree.children() {
        find_mutable_into(threshold, child, results);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Immutable,
    Mutable,
}

impl Strategy {
    /// Benchmark order.
    pub const ALL: [Strategy; 2] = [Strategy::Immutable, Strategy::Mutable];

    pub fn find(self, threshold: i64, tree: &TreeNode) -> Vec<u32> {
        match self {
            Strategy::Immutable => find_immutable(threshold, tree),
            Strategy::Mutable => find_mutable(threshold, tree),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Strategy::Immutable => "Immutable",
            Strategy::Mutable => "Mutable",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Count and sum of a result list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Checksum {
    pub count: usize,
    pub sum: u64,
}

impl Checksum {
    pub fn of(values: &[u32]) -> Self {
        Self {
            count: values.len(),
            sum: values.iter().map(|&v| u64::from(v)).sum(),
        }
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sum of {} numbers = {}", self.count, self.sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> TreeNode {
        TreeNode::new(
            90,
            vec![
                TreeNode::new(85, vec![TreeNode::leaf(10), TreeNode::leaf(99)]),
                TreeNode::leaf(81),
            ],
        )
    }

    #[test]
    fn test_immutable_emits_node_after_children() {
        assert_eq!(find_immutable(80, &sample_tree()), vec![99, 85, 81, 90]);
    }

    #[test]
    fn test_mutable_emits_node_before_children() {
        assert_eq!(find_mutable(80, &sample_tree()), vec![90, 85, 99, 81]);
    }

    #[test]
    fn test_find_mutable_into_appends() {
        let mut results = vec![1];
        find_mutable_into(95, &sample_tree(), &mut results);
        assert_eq!(results, vec![1, 99]);
    }

    #[test]
    fn test_checksum() {
        let checksum = Checksum::of(&[81, 90, 99]);
        assert_eq!(checksum, Checksum { count: 3, sum: 270 });
        assert_eq!(checksum.to_string(), "Sum of 3 numbers = 270");
        assert_eq!(Checksum::of(&[]), Checksum::default());
    }

    #[test]
    fn test_strategy_dispatch() {
        let tree = sample_tree();
        assert_eq!(Strategy::Immutable.find(80, &tree), find_immutable(80, &tree));
        assert_eq!(Strategy::Mutable.find(80, &tree), find_mutable(80, &tree));
        assert_eq!(Strategy::Mutable.to_string(), "Mutable");
    }
}
