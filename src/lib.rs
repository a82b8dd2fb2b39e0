//! treebench: balanced-tree generation and traversal micro-benchmark
//!
//! A [`builder::TreeBuilder`] produces balanced N-ary trees with random
//! values, [`traversal`] offers two equivalent threshold searches (one
//! allocating a fresh `Vec` per subtree, one appending into a shared buffer)
//! and [`harness::Harness`] times them over trees of increasing size.

pub mod builder;
pub mod cli;
pub mod config;
pub mod errors;
pub mod exitcode;
pub mod harness;
pub mod traversal;
pub mod tree;
pub mod tree_traits;
pub mod util;

pub use builder::TreeBuilder;
pub use errors::{BenchError, BenchResult, TreeError, TreeResult};
pub use harness::{BenchmarkSample, Harness, SampleReport, SmokeReport};
pub use traversal::{find_immutable, find_mutable, Checksum, Strategy};
pub use tree::TreeNode;
