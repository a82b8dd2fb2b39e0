use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TreeError {
    #[error("Cannot build a tree with zero nodes")]
    ZeroNodeCount,

    #[error("Fan-out must be at least {min}, got {0}", min = crate::builder::MIN_FAN_OUT)]
    FanOutTooSmall(usize),
}

pub type TreeResult<T> = Result<T, TreeError>;

/// Errors raised while preparing or running a benchmark.
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("{0}")]
    Tree(#[from] TreeError),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

pub type BenchResult<T> = Result<T, BenchError>;
