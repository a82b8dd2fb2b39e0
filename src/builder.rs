use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use tracing::{debug, instrument};

use crate::errors::{TreeError, TreeResult};
use crate::tree::TreeNode;

/// Children per inner node in the reference sizing.
pub const DEFAULT_FAN_OUT: usize = 8;

/// Below this a tree degenerates into a chain as deep as its node count.
pub const MIN_FAN_OUT: usize = 2;

/// Node values are drawn uniformly from `VALUE_MIN..VALUE_MAX`.
pub const VALUE_MIN: u32 = 1;
pub const VALUE_MAX: u32 = 100;

/// Builds balanced N-ary trees with random node values.
///
/// The node count of every subtree is spread as evenly as possible over
/// `fan_out` child slots; slots that would receive zero nodes are skipped.
pub struct TreeBuilder {
    rng: Box<dyn RngCore>,
    fan_out: usize,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TreeBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeBuilder")
            .field("fan_out", &self.fan_out)
            .finish_non_exhaustive()
    }
}

impl TreeBuilder {
    /// Unseeded builder backed by the thread-local generator.
    pub fn new() -> Self {
        Self {
            rng: Box::new(rand::thread_rng()),
            fan_out: DEFAULT_FAN_OUT,
        }
    }

    /// Reproducible builder: equal seeds yield equal trees.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Box::new(StdRng::seed_from_u64(seed)),
            fan_out: DEFAULT_FAN_OUT,
        }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::with_seed(s),
            None => Self::new(),
        }
    }

    pub fn fan_out(mut self, fan_out: usize) -> Self {
        self.fan_out = fan_out;
        self
    }

    #[instrument(level = "debug", skip(self))]
    pub fn build(&mut self, node_count: usize) -> TreeResult<TreeNode> {
        if node_count == 0 {
            return Err(TreeError::ZeroNodeCount);
        }
        if self.fan_out < MIN_FAN_OUT {
            return Err(TreeError::FanOutTooSmall(self.fan_out));
        }
        let tree = self.build_subtree(node_count);
        debug!(node_count, depth = tree.depth(), "tree built");
        Ok(tree)
    }

    fn build_subtree(&mut self, node_count: usize) -> TreeNode {
        let value = self.rng.gen_range(VALUE_MIN..VALUE_MAX);
        if node_count == 1 {
            return TreeNode::leaf(value);
        }
        let children = child_sizes(node_count, self.fan_out)
            .into_iter()
            .map(|size| self.build_subtree(size))
            .collect();
        TreeNode::new(value, children)
    }
}

/// Sizes of the non-empty child subtrees of a node holding `node_count` nodes.
///
/// The first `(node_count - 1) % fan_out` slots get one extra node.
pub fn child_sizes(node_count: usize, fan_out: usize) -> Vec<usize> {
    if node_count <= 1 || fan_out == 0 {
        return Vec::new();
    }
    let remaining = node_count - 1;
    let base = remaining / fan_out;
    let remainder = remaining % fan_out;
    // Slots past `remaining` are always empty
    (0..fan_out.min(remaining))
        .map(|slot| if slot < remainder { base + 1 } else { base })
        .filter(|&size| size > 0)
        .collect()
}
