//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Balanced-tree micro-benchmark: allocation-style vs mutation-style traversal
#[derive(Parser, Debug)]
#[command(name = "treebench")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Turn debugging information on (repeat for more: -d -d -d)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Additional config file (TOML)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Seed for reproducible trees
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Collect values strictly greater than this
    #[arg(short, long, global = true, allow_negative_numbers = true)]
    pub threshold: Option<i64>,

    /// Timed traversals per variant and tree size
    #[arg(short = 'n', long, global = true)]
    pub iterations: Option<u32>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Smoke test, then the timed benchmark (default)
    Run {
        /// Tree sizes to benchmark, in order
        #[arg(long, value_delimiter = ',')]
        sizes: Option<Vec<usize>>,
        /// Skip the smoke test block
        #[arg(long)]
        no_smoke: bool,
    },

    /// Print both traversal results for one small tree
    Smoke {
        /// Node count of the tree
        #[arg(short, long)]
        size: Option<usize>,
    },

    /// Render a generated tree
    Tree {
        /// Node count of the tree
        #[arg(short, long)]
        size: Option<usize>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show global config path
    Path,

    /// Print config template
    Init,
}
