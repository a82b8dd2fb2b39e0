//! Benchmark harness - timed traversals over trees of increasing size
//!
//! Every sample runs each [`Strategy`] `iterations` times and reports the
//! checksum of the last result together with the average wall-clock time per
//! iteration. Nothing is asserted: comparing the variants is left to the
//! reader of the printed report.

use std::fmt;
use std::hint::black_box;
use std::time::{Duration, Instant};

use itertools::Itertools;
use tracing::{debug, info, instrument};

use crate::builder::TreeBuilder;
use crate::config::Settings;
use crate::errors::TreeResult;
use crate::traversal::{Checksum, Strategy};
use crate::tree::TreeNode;

/// A requested node count paired with its generated tree.
#[derive(Debug, Clone)]
pub struct BenchmarkSample {
    pub node_count: usize,
    pub tree: TreeNode,
}

impl BenchmarkSample {
    pub fn generate(builder: &mut TreeBuilder, node_count: usize) -> TreeResult<Self> {
        Ok(Self {
            node_count,
            tree: builder.build(node_count)?,
        })
    }

    /// Generates every sample up front, in `sizes` order.
    #[instrument(level = "info", skip(builder))]
    pub fn generate_all(builder: &mut TreeBuilder, sizes: &[usize]) -> TreeResult<Vec<Self>> {
        sizes
            .iter()
            .map(|&node_count| Self::generate(builder, node_count))
            .collect()
    }
}

/// Outcome of timing one strategy on one tree.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantTiming {
    pub strategy: Strategy,
    pub checksum: Checksum,
    pub elapsed: Duration,
    pub iterations: u32,
}

impl VariantTiming {
    /// Average milliseconds per iteration.
    pub fn avg_ms(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.elapsed.as_secs_f64() * 1_000.0 / f64::from(self.iterations)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SampleReport {
    pub node_count: usize,
    pub timings: Vec<VariantTiming>,
}

impl SampleReport {
    pub fn timing(&self, strategy: Strategy) -> Option<&VariantTiming> {
        self.timings.iter().find(|t| t.strategy == strategy)
    }
}

/// `"Immutable: "` / `"Mutable:   "`, so the columns line up.
fn column(strategy: Strategy) -> String {
    format!("{:<11}", format!("{}:", strategy.label()))
}

impl fmt::Display for SampleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = self.timings.iter().map(|t| {
            format!(
                "{} nodes - {}{}. Spent {:.2}ms.",
                self.node_count,
                column(t.strategy),
                t.checksum,
                t.avg_ms()
            )
        });
        write!(f, "{}", lines.format("\n"))
    }
}

/// Raw results of a single untimed run per strategy, for eyeballing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmokeReport {
    pub node_count: usize,
    pub results: Vec<(Strategy, Vec<u32>)>,
}

impl fmt::Display for SmokeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = self.results.iter().map(|(strategy, values)| {
            format!(
                "{} nodes - {}{}",
                self.node_count,
                column(*strategy),
                values.iter().join(",")
            )
        });
        write!(f, "{}", lines.format("\n"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Harness {
    threshold: i64,
    iterations: u32,
}

impl Harness {
    pub fn new(threshold: i64, iterations: u32) -> Self {
        Self {
            threshold,
            iterations,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.threshold, settings.iterations)
    }

    #[instrument(level = "debug", skip(self, tree))]
    pub fn time_variant(&self, strategy: Strategy, tree: &TreeNode) -> VariantTiming {
        let mut result = Vec::new();
        let start = Instant::now();
        for _ in 0..self.iterations {
            result = black_box(strategy.find(self.threshold, black_box(tree)));
        }
        let elapsed = start.elapsed();
        debug!(?elapsed, matches = result.len(), "variant timed");
        VariantTiming {
            strategy,
            checksum: Checksum::of(&result),
            elapsed,
            iterations: self.iterations,
        }
    }

    #[instrument(level = "info", skip(self, sample), fields(node_count = sample.node_count))]
    pub fn run_sample(&self, sample: &BenchmarkSample) -> SampleReport {
        let timings = Strategy::ALL
            .iter()
            .map(|&strategy| self.time_variant(strategy, &sample.tree))
            .collect();
        SampleReport {
            node_count: sample.node_count,
            timings,
        }
    }

    /// Runs all samples in order, handing each report to `on_report` as soon
    /// as it is ready.
    pub fn run<F>(&self, samples: &[BenchmarkSample], mut on_report: F) -> Vec<SampleReport>
    where
        F: FnMut(&SampleReport),
    {
        info!(
            samples = samples.len(),
            threshold = self.threshold,
            iterations = self.iterations,
            "starting benchmark"
        );
        samples
            .iter()
            .map(|sample| {
                let report = self.run_sample(sample);
                on_report(&report);
                report
            })
            .collect()
    }

    pub fn smoke(&self, tree: &TreeNode) -> SmokeReport {
        SmokeReport {
            node_count: tree.node_count(),
            results: Strategy::ALL
                .iter()
                .map(|&strategy| (strategy, strategy.find(self.threshold, tree)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timing(strategy: Strategy, count: usize, sum: u64, millis: u64) -> VariantTiming {
        VariantTiming {
            strategy,
            checksum: Checksum { count, sum },
            elapsed: Duration::from_millis(millis),
            iterations: 10,
        }
    }

    #[test]
    fn test_avg_ms() {
        let t = timing(Strategy::Mutable, 0, 0, 125);
        assert!((t.avg_ms() - 12.5).abs() < 1e-9);
    }

    #[test]
    fn test_sample_report_format() {
        let report = SampleReport {
            node_count: 2000,
            timings: vec![
                timing(Strategy::Immutable, 380, 34580, 25),
                timing(Strategy::Mutable, 380, 34580, 10),
            ],
        };

        assert_eq!(
            report.to_string(),
            "2000 nodes - Immutable: Sum of 380 numbers = 34580. Spent 2.50ms.\n\
             2000 nodes - Mutable:   Sum of 380 numbers = 34580. Spent 1.00ms."
        );
    }

    #[test]
    fn test_smoke_report_format() {
        let report = SmokeReport {
            node_count: 30,
            results: vec![
                (Strategy::Immutable, vec![99, 85]),
                (Strategy::Mutable, vec![85, 99]),
            ],
        };

        assert_eq!(
            report.to_string(),
            "30 nodes - Immutable: 99,85\n30 nodes - Mutable:   85,99"
        );
    }

    #[test]
    fn test_report_lookup_by_strategy() {
        let report = SampleReport {
            node_count: 1,
            timings: vec![timing(Strategy::Mutable, 1, 90, 1)],
        };
        assert!(report.timing(Strategy::Mutable).is_some());
        assert!(report.timing(Strategy::Immutable).is_none());
    }
}
