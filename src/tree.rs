//! Immutable N-ary tree of integer values.
//!
//! Nodes are created by [`crate::builder::TreeBuilder`] and never change
//! afterwards; only shared accessors are exposed.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    value: u32,
    children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(value: u32, children: Vec<TreeNode>) -> Self {
        Self { value, children }
    }

    pub fn leaf(value: u32) -> Self {
        Self::new(value, Vec::new())
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Children in traversal order.
    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(TreeNode::node_count)
            .sum::<usize>()
    }

    /// Number of levels; a single node has depth 1.
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(TreeNode::depth)
            .max()
            .unwrap_or(0)
    }

    pub fn leaf_count(&self) -> usize {
        self.iter().filter(|node| node.is_leaf()).count()
    }

    /// Pre-order iterator, children visited left-to-right.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }
}

impl<'a> IntoIterator for &'a TreeNode {
    type Item = &'a TreeNode;
    type IntoIter = TreeIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct TreeIterator<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> TreeIterator<'a> {
    fn new(root: &'a TreeNode) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        // Push children in reverse order for left-to-right traversal
        for child in current.children.iter().rev() {
            self.stack.push(child);
        }
        Some(current)
    }
}
